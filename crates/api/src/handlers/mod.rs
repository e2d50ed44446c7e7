pub mod corpus;
pub mod intent;
pub mod query;
