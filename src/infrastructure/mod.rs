pub mod geocode;
pub mod ipapi;
pub mod storage;
