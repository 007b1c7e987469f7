pub mod dashboard_service;
pub mod department_service;
pub mod error;
pub mod feedback_service;
pub mod knowledge_service;
pub mod seed_service;
pub mod ticket_service;
pub mod user_service;
