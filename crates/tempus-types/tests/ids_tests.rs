use tempus_types::*;

#[test]
fn job_ids_order_and_display() {
    let a = JobId::new(1);
    let b = JobId::new(2);
    assert!(a < b);
    assert_eq!(a.to_string(), "1");
    assert_eq!(b.as_u64(), 2);
}

#[test]
fn job_id_from_raw() {
    let id: JobId = 42u64.into();
    assert_eq!(id, JobId::new(42));
}

#[test]
fn job_id_serde_roundtrip() {
    let id = JobId::new(7);
    let s = serde_json::to_string(&id).unwrap();
    let back: JobId = serde_json::from_str(&s).unwrap();
    assert_eq!(id, back);
}
