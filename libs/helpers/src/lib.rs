pub mod columns;
pub mod index;
