//! Helpers shared by the integration tests; not every test binary uses all of them.
#![allow(dead_code)]

pub mod stub_renderer;
