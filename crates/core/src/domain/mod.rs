pub mod glass;
pub mod material;
pub mod recommendation;
pub mod request;
