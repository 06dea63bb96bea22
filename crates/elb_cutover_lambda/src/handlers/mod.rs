pub mod cutover;
