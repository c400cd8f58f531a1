pub mod commodity;
pub mod contact;
pub mod season;
