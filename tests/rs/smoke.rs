//! Integration smoke tests for `uni_grades`

use uni_grades::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}
