mod fs;


pub use fs::{dir_name, path_to_string};
