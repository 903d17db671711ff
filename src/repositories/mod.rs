pub(crate) mod absence_events;
pub(crate) mod distributions;
pub(crate) mod enrollments;
pub(crate) mod health;
pub(crate) mod notifications;
pub(crate) mod penalty_events;
pub(crate) mod subjects;
