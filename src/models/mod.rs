pub mod articlemodel;
pub mod departmentmodel;
pub mod feedbackmodel;
pub mod ticketmodel;
pub mod usermodel;
