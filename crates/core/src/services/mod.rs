pub mod balance;
pub mod finance_service;
pub mod investment_service;
pub mod unlock;
