pub mod evidence;
pub mod likelihood;
pub mod posterior;
