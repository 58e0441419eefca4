//! Integration tests for sdk-release
//!
//! Each test builds an SDK-shaped git repository in a temp dir, with a bare
//! repository as `origin`, and drives the compiled binary against it.

mod test_release;
