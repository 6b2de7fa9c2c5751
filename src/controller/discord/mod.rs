pub mod checkin;
pub mod interaction;
