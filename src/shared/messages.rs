//! User-facing messages for service outcomes

pub const USER_NOT_FOUND: &str = "User not found.";
pub const EVENT_NOT_FOUND: &str = "Event not found.";
pub const UNAUTHORIZED_ACCESS: &str = "Unauthorized access.";
pub const INVALID_DATE_RANGE: &str = "Invalid date range.";
pub const INVALID_EVENT_DATA: &str = "Invalid event data";
pub const START_AFTER_END: &str = "Start date cannot be later than end date.";

pub const CREATE_EVENT_SUCCESS: &str = "Event created successfully.";
pub const CREATE_EVENT_ERROR: &str = "Event could not be created.";
pub const UPDATE_EVENT_SUCCESS: &str = "Event updated successfully.";
pub const UPDATE_EVENT_ERROR: &str = "Event could not be updated.";
pub const DELETE_EVENT_SUCCESS: &str = "Event deleted successfully.";
pub const DELETE_EVENT_ERROR: &str = "Event could not be deleted.";

pub const EMPTY_EVENT_LIST: &str = "Event list is empty.";
pub const EMPTY_PARTICIPANT_LIST: &str = "Participant list is empty.";
pub const EVENTS_RETRIEVED: &str = "Events retrieved successfully.";
pub const PARTICIPANT_COUNT_RETRIEVED: &str = "Participant count retrieved successfully.";

pub const OPERATION_CANCELLED: &str = "Operation was cancelled.";
