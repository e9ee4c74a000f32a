pub mod de;
pub mod product;
pub mod order;
pub mod user;
