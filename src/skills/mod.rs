pub mod weakness;
