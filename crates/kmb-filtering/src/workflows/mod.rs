pub mod approval;
pub mod elaborate;
pub mod filtering;
pub mod policy;
pub mod reference;
