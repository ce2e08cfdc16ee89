pub mod common;
pub mod mass;
pub mod mstomp;
pub mod normalize;
pub mod stamp;
pub mod stmp;
