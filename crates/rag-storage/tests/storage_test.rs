//! Storage behaviour: atomic ingestion units, search channels, maintenance
//! reads, and file-backed read/write separation.

use rag_core::models::NewChunk;
use rag_core::traits::IChunkStorage;
use rag_storage::StorageEngine;

fn unit(v: &[f32]) -> Vec<f32> {
    let n = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    v.iter().map(|x| x / n).collect()
}

fn chunk(index: usize, text: &str, embedding: Vec<f32>) -> NewChunk {
    NewChunk {
        text: text.to_string(),
        chunk_index: index,
        source: "test".to_string(),
        embedding,
    }
}

#[test]
fn document_and_chunks_round_trip() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let rows = vec![
        chunk(0, "first chunk", unit(&[1.0, 0.0, 0.0])),
        chunk(1, "second chunk", unit(&[0.0, 1.0, 0.0])),
    ];
    let (doc, n) = engine
        .store_document_with_chunks("test", "first chunk second chunk", &rows)
        .unwrap();
    assert_eq!(n, 2);

    let stored = engine.get_document(&doc.id).unwrap().unwrap();
    assert_eq!(stored.source, "test");
    assert_eq!(stored.raw_text, "first chunk second chunk");

    let chunks = engine.get_chunks(&doc.id).unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].chunk_index, 0);
    assert_eq!(chunks[1].chunk_index, 1);
    assert_eq!(chunks[1].text, "second chunk");
    assert_eq!(chunks[0].embedding, rows[0].embedding);
    assert!(chunks.iter().all(|c| c.document_id == doc.id));
    assert!(chunks.iter().all(|c| c.id.len() == 32));
}

#[test]
fn failed_chunk_insert_rolls_back_document() {
    let engine = StorageEngine::open_in_memory().unwrap();
    // Duplicate chunk_index violates UNIQUE(document_id, chunk_index).
    let rows = vec![
        chunk(0, "a", vec![1.0]),
        chunk(0, "b", vec![1.0]),
    ];
    let err = engine
        .store_document_with_chunks("test", "a b", &rows)
        .unwrap_err();
    assert_eq!(err.kind(), rag_core::ErrorKind::StorageUnavailable);
    assert_eq!(engine.count_documents().unwrap(), 0);
    assert_eq!(engine.count_chunks().unwrap(), 0);
}

#[test]
fn rejected_pre_commit_rolls_back_whole_unit() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let rows = vec![chunk(0, "a", vec![1.0]), chunk(1, "b", vec![1.0])];
    let err = engine
        .store_document_with_chunks_checked("test", "a b", &rows, &|| {
            Err(rag_core::errors::RagError::DeadlineExceeded {
                operation: "ingest/commit".into(),
                elapsed_ms: 0,
            })
        })
        .unwrap_err();
    assert_eq!(err.kind(), rag_core::ErrorKind::DeadlineExceeded);
    assert_eq!(engine.count_documents().unwrap(), 0);
    assert_eq!(engine.count_chunks().unwrap(), 0);

    // The writer is still usable afterwards.
    engine.store_document_with_chunks("test", "a b", &rows).unwrap();
    assert_eq!(engine.count_documents().unwrap(), 1);
}

#[test]
fn separate_insert_calls_also_work() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let doc = engine.insert_document("manual", "hello").unwrap();
    let n = engine
        .insert_chunks(&doc.id, &[chunk(0, "hello", vec![1.0, 0.0])])
        .unwrap();
    assert_eq!(n, 1);
    assert_eq!(engine.count_chunks().unwrap(), 1);
}

#[test]
fn vector_search_ranks_identical_embedding_first() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let target = unit(&[0.2, 0.9, 0.1]);
    let rows = vec![
        chunk(0, "far", unit(&[1.0, 0.0, 0.0])),
        chunk(1, "target", target.clone()),
        chunk(2, "near", unit(&[0.3, 0.8, 0.2])),
    ];
    engine.store_document_with_chunks("t", "x", &rows).unwrap();

    let hits = engine.vector_search(&target, 10).unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].0.text, "target");
    assert!((hits[0].1 - 1.0).abs() < 1e-6);
    assert_eq!(hits[1].0.text, "near");
    assert!(hits.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn vector_search_respects_limit_and_skips_other_widths() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let rows = vec![
        chunk(0, "two-d", vec![1.0, 0.0]),
        chunk(1, "three-d a", unit(&[1.0, 1.0, 0.0])),
        chunk(2, "three-d b", unit(&[0.0, 1.0, 1.0])),
    ];
    engine.store_document_with_chunks("t", "x", &rows).unwrap();

    let hits = engine.vector_search(&unit(&[1.0, 1.0, 1.0]), 10).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|(c, _)| c.text.starts_with("three-d")));

    assert_eq!(engine.vector_search(&[1.0, 0.0, 0.0], 1).unwrap().len(), 1);
    assert!(engine.vector_search(&[1.0, 0.0, 0.0], 0).unwrap().is_empty());
}

#[test]
fn keyword_search_requires_every_term_case_insensitively() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let rows = vec![
        chunk(0, "Rust is a systems language", vec![1.0]),
        chunk(1, "Python is a scripting language", vec![1.0]),
        chunk(2, "rust and python interop", vec![1.0]),
    ];
    engine.store_document_with_chunks("t", "x", &rows).unwrap();

    let terms = |t: &[&str]| t.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let hits = engine.keyword_search(&terms(&["RUST"]), 10).unwrap();
    let texts: Vec<&str> = hits.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Rust is a systems language", "rust and python interop"]);

    let hits = engine
        .keyword_search(&terms(&["rust", "python"]), 10)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "rust and python interop");

    assert!(engine.keyword_search(&[], 10).unwrap().is_empty());
    assert_eq!(
        engine.keyword_search(&terms(&["language"]), 1).unwrap().len(),
        1
    );
}

#[test]
fn keyword_search_treats_wildcards_literally() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let rows = vec![
        chunk(0, "save 50% today", vec![1.0]),
        chunk(1, "save 500 today", vec![1.0]),
    ];
    engine.store_document_with_chunks("t", "x", &rows).unwrap();

    let hits = engine.keyword_search(&["50%".to_string()], 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "save 50% today");
}

#[test]
fn keyword_search_folds_non_ascii_case() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let rows = vec![
        chunk(0, "CAFÉ ÜBER alles", vec![1.0]),
        chunk(1, "cafe uber alles", vec![1.0]),
    ];
    engine.store_document_with_chunks("t", "x", &rows).unwrap();

    let hits = engine.keyword_search(&["café".to_string()], 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "CAFÉ ÜBER alles");

    let hits = engine
        .keyword_search(&["Über".to_string(), "ALLES".to_string()], 10)
        .unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn read_pool_connections_fold_non_ascii_case() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&dir.path().join("rag.db")).unwrap();
    engine
        .store_document_with_chunks("t", "x", &[chunk(0, "Ärger im Büro", vec![1.0])])
        .unwrap();
    let hits = engine.keyword_search(&["ärger".to_string()], 10).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn update_embeddings_replaces_only_embedding() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let (doc, _) = engine
        .store_document_with_chunks("t", "x", &[chunk(0, "body", vec![1.0, 0.0])])
        .unwrap();
    let before = engine.get_chunks(&doc.id).unwrap().remove(0);

    let changed = engine
        .update_embeddings(&[
            (before.id.clone(), vec![0.0, 1.0]),
            ("missing".to_string(), vec![1.0, 0.0]),
        ])
        .unwrap();
    assert_eq!(changed, 1);

    let after = engine.get_chunks(&doc.id).unwrap().remove(0);
    assert_eq!(after.embedding, vec![0.0, 1.0]);
    assert_eq!(after.text, before.text);
    assert_eq!(after.chunk_index, before.chunk_index);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn list_chunks_pages_in_insertion_order() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let rows: Vec<NewChunk> = (0..5).map(|i| chunk(i, &format!("c{i}"), vec![1.0])).collect();
    engine.store_document_with_chunks("t", "x", &rows).unwrap();

    let page1 = engine.list_chunks(0, 2).unwrap();
    let page2 = engine.list_chunks(2, 2).unwrap();
    let page3 = engine.list_chunks(4, 2).unwrap();
    let texts: Vec<String> = page1
        .iter()
        .chain(&page2)
        .chain(&page3)
        .map(|c| c.text.clone())
        .collect();
    assert_eq!(texts, vec!["c0", "c1", "c2", "c3", "c4"]);
    assert!(engine.list_chunks(5, 2).unwrap().is_empty());
}

#[test]
fn missing_document_is_none() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.get_document("nope").unwrap().is_none());
    assert!(engine.get_chunks("nope").unwrap().is_empty());
}

#[test]
fn file_backed_engine_reads_through_pool_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rag.db");

    let doc_id = {
        let engine = StorageEngine::open(&path).unwrap();
        let (doc, _) = engine
            .store_document_with_chunks("file", "persisted", &[chunk(0, "persisted", vec![1.0])])
            .unwrap();
        // Reads go through the read pool and see committed writes.
        assert_eq!(engine.count_chunks().unwrap(), 1);
        assert!(rag_storage::pool::pragmas::verify_wal_mode(
            &rusqlite::Connection::open(&path).unwrap()
        )
        .unwrap());
        doc.id
    };

    let reopened = StorageEngine::open(&path).unwrap();
    assert_eq!(reopened.schema_version().unwrap(), rag_storage::migrations::LATEST_VERSION);
    assert_eq!(reopened.get_document(&doc_id).unwrap().unwrap().raw_text, "persisted");
}

#[test]
fn negative_stored_width_reads_as_corrupt_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rag.db");
    let engine = StorageEngine::open(&path).unwrap();
    let (doc, _) = engine
        .store_document_with_chunks("t", "x", &[chunk(0, "damaged", vec![1.0])])
        .unwrap();

    rusqlite::Connection::open(&path)
        .unwrap()
        .execute("UPDATE chunks SET dimensions = -1", [])
        .unwrap();

    let err = engine.get_chunks(&doc.id).unwrap_err();
    assert!(matches!(
        err,
        rag_core::errors::RagError::StorageError(rag_core::errors::StorageError::CorruptRow { .. })
    ));
    assert!(err.to_string().contains("dimensions is -1"));
    // The vector channel skips the row instead of decoding it.
    assert!(engine.vector_search(&[1.0], 10).unwrap().is_empty());
}
