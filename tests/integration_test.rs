use proptest::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;
use vrm_meta::extract::{extract, inspect, inspect_path, MetadataSource};
use vrm_meta::metadata::{FIELD_DEFAULTS, SAMPLE_BLENDSHAPES, SAMPLE_BONES};
use vrm_meta::{
    normalize, read_container, AvatarMetadata, ChunkHeader, FallbackReason, GlbHeader,
    CHUNK_TYPE_BIN, CHUNK_TYPE_JSON,
};

fn glb_with(chunk_type: &[u8; 4], chunk_len: u32, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    GlbHeader::new(2, 100).write(&mut buf).unwrap();
    ChunkHeader::new(chunk_type, chunk_len).write(&mut buf).unwrap();
    buf.extend_from_slice(payload);
    buf
}

fn glb(json: &str) -> Vec<u8> {
    glb_with(CHUNK_TYPE_JSON, json.len() as u32, json.as_bytes())
}

fn pipeline(buf: &[u8]) -> AvatarMetadata {
    let read = read_container(buf);
    normalize(read.as_ref().map(|p| p.text.as_str()))
}

#[test]
fn test_zoe_end_to_end() {
    let json = r#"{"extensions":{"VRM":{"meta":{"title":"Zoe"}}}}"#;
    let ex = inspect(Some(glb(json).as_slice()));

    assert_eq!(ex.source, MetadataSource::Parsed);
    assert_eq!(ex.metadata.name, "Zoe");
    assert_eq!(ex.metadata.title, "Zoe");
    assert_eq!(ex.metadata.author, FIELD_DEFAULTS.author);
    assert_eq!(ex.metadata.blendshapes, SAMPLE_BLENDSHAPES);
    assert_eq!(ex.metadata.bones, SAMPLE_BONES);

    let info = ex.container.unwrap();
    assert_eq!(info.version, 2);
    assert_eq!(info.total_length, 100);
    assert_eq!(info.chunk_length, json.len() as u32);
}

#[test]
fn test_chunk_length_cutting_document_short_is_malformed() {
    let json = r#"{"extensions":{"VRM":{"meta":{"title":"Zoe"}}}}"#;
    let ex = inspect(Some(glb_with(CHUNK_TYPE_JSON, 29, json.as_bytes()).as_slice()));

    assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::MalformedJson));
    assert_eq!(&ex.metadata, AvatarMetadata::sample());
    assert!(ex.container.is_some());
}

#[test]
fn test_empty_buffer_uses_sample() {
    let ex = inspect(Some(&[][..]));
    assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::InvalidMagic));
    assert_eq!(&ex.metadata, AvatarMetadata::sample());
    assert!(ex.container.is_none());
}

#[test]
fn test_bin_first_chunk_uses_sample() {
    let ex = inspect(Some(glb_with(CHUNK_TYPE_BIN, 4, &[0, 1, 2, 3]).as_slice()));
    assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::UnexpectedChunkType));
    assert_eq!(&ex.metadata, AvatarMetadata::sample());
}

#[test]
fn test_absent_input_uses_sample() {
    let ex = inspect(None);
    assert!(ex.is_sample());
    assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::Unavailable));
    assert_eq!(&extract(None), AvatarMetadata::sample());
}

#[test]
fn test_missing_extension_leaks_nothing() {
    let json = r#"{"asset":{"version":"2.0","generator":"Blender"},"extensions":{"KHR_materials_unlit":{}}}"#;
    let ex = inspect(Some(glb(json).as_slice()));
    assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::MissingExtension));
    assert_eq!(&ex.metadata, AvatarMetadata::sample());
}

#[test]
fn test_blendshapes_from_document() {
    let json = r#"{"extensions":{"VRM":{"blendShapeMaster":{"blendShapeGroups":[
        {"name":"A","presetName":"unknown"},{"name":"B","presetName":"unknown"}]}}}}"#;
    assert_eq!(extract(Some(glb(json).as_slice())).blendshapes, ["A", "B"]);

    let json = r#"{"extensions":{"VRM":{"blendShapeMaster":{"blendShapeGroups":[]}}}}"#;
    assert_eq!(extract(Some(glb(json).as_slice())).blendshapes, SAMPLE_BLENDSHAPES);
}

#[test]
fn test_wrongly_typed_vrm_blocks_use_sample() {
    for json in [
        r#"{"extensions":{"VRM":{"meta":"oops"}}}"#,
        r#"{"extensions":{"VRM":{"meta":{"title":"X"},"blendShapeMaster":"oops"}}}"#,
        r#"{"extensions":{"VRM":{"blendShapeMaster":{"blendShapeGroups":7}}}}"#,
        r#"{"extensions":{"VRM":{"blendShapeMaster":{"blendShapeGroups":["Joy"]}}}}"#,
    ] {
        let ex = inspect(Some(glb(json).as_slice()));
        assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::MalformedJson), "{json}");
        assert_eq!(&ex.metadata, AvatarMetadata::sample(), "{json}");
    }
}

#[test]
fn test_numeric_meta_value_is_kept() {
    let json = r#"{"extensions":{"VRM":{"meta":{"version":3,"title":"T","author":null}}}}"#;
    let md = extract(Some(glb(json).as_slice()));
    assert_eq!(md.version, "3");
    assert_eq!(md.title, "T");
    assert_eq!(md.author, FIELD_DEFAULTS.author);
}

#[test]
fn test_trailing_bin_chunk_is_ignored() {
    let json = r#"{"extensions":{"VRM":{"meta":{"title":"Tail","author":"Me"}}}}"#;
    let mut buf = glb(json);
    ChunkHeader::new(CHUNK_TYPE_BIN, 4).write(&mut buf).unwrap();
    buf.extend_from_slice(&[9, 9, 9, 9]);

    let md = extract(Some(buf.as_slice()));
    assert_eq!(md.name, "Tail");
    assert_eq!(md.author, "Me");
}

#[test]
fn test_truncated_payload_uses_sample() {
    let json = r#"{"extensions":{"VRM":{"meta":{"title":"Cut"}}}}"#;
    let mut buf = glb(json);
    buf.truncate(buf.len() - 5);
    let ex = inspect(Some(buf.as_slice()));
    assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::Truncated));
}

#[test]
fn test_pipeline_is_idempotent() {
    let json = r#"{"extensions":{"VRM":{"meta":{"title":"Twice","licenseName":"CC0"}}}}"#;
    let buf = glb(json);
    assert_eq!(pipeline(&buf), pipeline(&buf));
    assert_eq!(pipeline(&buf), extract(Some(buf.as_slice())));
}

#[test]
fn test_inspect_path_reads_file() {
    let json = r#"{"extensions":{"VRM":{"meta":{"title":"OnDisk","version":"1.0"}}}}"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&glb(json)).unwrap();
    file.flush().unwrap();

    let ex = inspect_path(file.path());
    assert!(!ex.is_sample());
    assert_eq!(ex.metadata.name, "OnDisk");
    assert_eq!(ex.metadata.version, "1.0");
}

#[test]
fn test_inspect_path_missing_file_uses_sample() {
    let dir = tempfile::tempdir().unwrap();
    let ex = inspect_path(dir.path().join("missing.vrm"));
    assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::Unavailable));
    assert_eq!(&ex.metadata, AvatarMetadata::sample());
}

#[test]
fn test_concurrent_extraction() {
    let json = r#"{"extensions":{"VRM":{"meta":{"title":"Threaded"}}}}"#;
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let buf = glb(json);
            std::thread::spawn(move || extract(Some(buf.as_slice())))
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap().name, "Threaded");
    }
}

proptest! {
    #[test]
    fn prop_non_magic_buffer_yields_sample(buf in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assume!(!buf.starts_with(b"glTF"));
        prop_assert_eq!(&pipeline(&buf), AvatarMetadata::sample());
        let ex = inspect(Some(buf.as_slice()));
        prop_assert_eq!(ex.fallback().map(|s| s.reason()), Some(FallbackReason::InvalidMagic));
    }

    #[test]
    fn prop_arbitrary_body_never_panics(body in proptest::collection::vec(any::<u8>(), 0..128)) {
        let mut buf = b"glTF".to_vec();
        buf.extend_from_slice(&body);
        let md = extract(Some(buf.as_slice()));
        prop_assert_eq!(md.bones, SAMPLE_BONES);
    }
}
