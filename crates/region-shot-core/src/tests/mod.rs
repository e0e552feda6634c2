mod fake_backend;
mod model;
mod preview;
