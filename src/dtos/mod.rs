pub mod articledtos;
pub mod dashboarddtos;
pub mod departmentdtos;
pub mod feedbackdtos;
pub mod ticketdtos;
pub mod userdtos;
