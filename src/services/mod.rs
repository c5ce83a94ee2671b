pub(crate) mod dotabuff;
pub(crate) mod pagination;

pub use dotabuff::DotabuffService;
pub use pagination::DateWindow;
