use rag_core::models::*;

#[test]
fn document_ids_are_32_char_lowercase_hex() {
    let doc = Document::new("manual", "text");
    assert_eq!(doc.id.len(), 32);
    assert!(doc
        .id
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_ne!(doc.id, Document::new("manual", "text").id);
}

#[test]
fn ingest_request_defaults_source_to_manual() {
    let req: IngestTextRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
    assert_eq!(req.source, "manual");
    assert_eq!(IngestTextRequest::new("hi"), req);
}

#[test]
fn search_request_top_k_is_optional() {
    let req: SearchRequest = serde_json::from_str(r#"{"q":"rust"}"#).unwrap();
    assert_eq!(req.top_k, None);
    let req: SearchRequest = serde_json::from_str(r#"{"q":"rust","top_k":7}"#).unwrap();
    assert_eq!(req.top_k, Some(7));
}

#[test]
fn scored_chunk_copies_record_fields() {
    let record = ChunkRecord {
        id: "c1".into(),
        document_id: "d1".into(),
        text: "body".into(),
        chunk_index: 0,
        source: "src".into(),
        embedding: vec![1.0],
        created_at: chrono::Utc::now(),
    };
    let scored = ScoredChunk::from_record(&record, 0.5);
    assert_eq!(scored.chunk_id, "c1");
    assert_eq!(scored.text, "body");
    assert_eq!(scored.source, "src");
    assert_eq!(scored.created_at, record.created_at);
}
