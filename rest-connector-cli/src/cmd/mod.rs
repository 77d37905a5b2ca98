pub mod decode;
pub mod run;
