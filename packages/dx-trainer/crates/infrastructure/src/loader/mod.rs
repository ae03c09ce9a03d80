pub mod template_dir;
