pub mod appointment;
pub mod calendar;
pub mod country;
pub mod lawyer;
pub mod office;
pub mod time_zone;
