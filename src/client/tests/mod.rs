use super::test_helpers::*;
use super::*;
use crate::types::{GenerateOutcome, RegisterBody};
use serde_json::json;
use std::time::Duration;
use tempfile::tempdir;
use wiremock::matchers::{body_bytes, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
