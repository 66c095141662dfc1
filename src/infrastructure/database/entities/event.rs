//! Event entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub organizer_id: Uuid,

    pub name: String,

    pub description: String,

    /// UTC instant; comparisons and ordering run on this column
    pub start_date: DateTimeUtc,

    /// Offset the organizer entered, in seconds east of UTC
    pub start_offset: i32,

    pub end_date: DateTimeUtc,

    pub end_offset: i32,

    pub location: String,

    /// Display label such as "Europe/Istanbul"
    pub timezone: String,

    pub created_at: DateTimeUtc,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::participant::Entity")]
    Participants,
}

impl Related<super::participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
