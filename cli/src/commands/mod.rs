pub mod encode;
pub mod notice;
pub mod replay;
