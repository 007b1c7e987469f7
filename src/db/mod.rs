pub mod articledb;
pub mod db;
pub mod departmentdb;
pub mod feedbackdb;
pub mod ticketdb;
pub mod userdb;

pub use db::DBClient;
