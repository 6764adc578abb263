use std::path::PathBuf;
use std::sync::Arc;
use tabula_config::{IgnoreFilters, TableBlockConfig};
use tabula_core::{DocumentRef, FieldValue, MemoryVault, Vault};
use tabula_sources::{Source, SourceError, SourceSpec, Table, WorkspaceContext};

fn wine_vault() -> Arc<dyn Vault> {
    Arc::new(
        MemoryVault::new()
            .with_document("wines/riesling.md", "---\nregion: mosel\n---\n")
            .with_document("wines/barolo.md", "---\nregion: piedmont\n---\n")
            .with_document(
                "strains/Riesling.md",
                "---\ntags: strain\n---\nA white grape.\n",
            )
            .with_document("strains/Nebbiolo.md", "---\ntags: strain\n---\n"),
    )
}

fn directory_source(vault: Arc<dyn Vault>, path: &str) -> Source {
    Source::new(
        0,
        SourceSpec::Directory {
            path: PathBuf::from(path),
        },
        vault,
        IgnoreFilters::none(),
    )
}

#[tokio::test]
async fn end_to_end_wines_scenario() {
    let vault = wine_vault();
    let source = directory_source(vault, "wines");
    let riesling = DocumentRef::new("wines/riesling.md");

    source
        .set_link(&riesling, "strain", &["Riesling".to_string()])
        .await
        .unwrap();

    let records = source.load_records().await.unwrap();
    let record = records
        .iter()
        .find(|r| r.file == riesling)
        .expect("riesling record");

    assert_eq!(
        record.get("region"),
        Some(&FieldValue::Scalar("mosel".to_string()))
    );
    assert_eq!(
        record.get("strain"),
        Some(&FieldValue::List(vec!["Riesling".to_string()]))
    );
    assert_eq!(record.source, *source.id());
}

#[tokio::test]
async fn set_data_leaves_link_block_untouched() {
    let vault: Arc<dyn Vault> = Arc::new(MemoryVault::new().with_document(
        "wines/riesling.md",
        "---\nregion: mosel\n---\n%%%\nstrain: '[[Riesling]]'\n%%%\nBODY\n",
    ));
    let source = directory_source(vault.clone(), "wines");
    let doc = DocumentRef::new("wines/riesling.md");

    source
        .set_data(&doc, "region", &FieldValue::from("rheingau"))
        .await
        .unwrap();

    let text = vault.read(&doc).await.unwrap();
    assert!(text.contains("%%%\nstrain: '[[Riesling]]'\n%%%\nBODY\n"));
    assert!(text.contains("region: rheingau"));
}

#[tokio::test]
async fn set_link_leaves_frontmatter_and_body_untouched() {
    let vault: Arc<dyn Vault> = Arc::new(
        MemoryVault::new().with_document("wines/riesling.md", "---\nregion: mosel\n---\nBODY\n"),
    );
    let source = directory_source(vault.clone(), "wines");
    let doc = DocumentRef::new("wines/riesling.md");

    source
        .set_link(&doc, "strain", &["Riesling".to_string()])
        .await
        .unwrap();

    let text = vault.read(&doc).await.unwrap();
    assert_eq!(
        text,
        "---\nregion: mosel\n---\n%%%\nstrain: '[[Riesling]]'\n%%%\nBODY\n"
    );
}

#[tokio::test]
async fn set_link_twice_is_idempotent() {
    let vault = wine_vault();
    let source = directory_source(vault.clone(), "wines");
    let doc = DocumentRef::new("wines/riesling.md");
    let values = vec!["Riesling".to_string()];

    source.set_link(&doc, "strain", &values).await.unwrap();
    let first = vault.read(&doc).await.unwrap();

    source.set_link(&doc, "strain", &values).await.unwrap();
    let second = vault.read(&doc).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn stale_write_is_rejected() {
    // Wrap the vault so the mutation sees a stale cached read
    struct StaleCacheVault {
        inner: MemoryVault,
        stale: String,
    }

    #[async_trait::async_trait]
    impl Vault for StaleCacheVault {
        async fn list(&self) -> tabula_core::VaultResult<Vec<DocumentRef>> {
            self.inner.list().await
        }
        async fn read(&self, doc: &DocumentRef) -> tabula_core::VaultResult<String> {
            self.inner.read(doc).await
        }
        async fn cached_read(&self, _doc: &DocumentRef) -> tabula_core::VaultResult<String> {
            Ok(self.stale.clone())
        }
        async fn write(&self, doc: &DocumentRef, text: &str) -> tabula_core::VaultResult<()> {
            self.inner.write(doc, text).await
        }
        async fn create(
            &self,
            path: &std::path::Path,
            text: &str,
        ) -> tabula_core::VaultResult<DocumentRef> {
            self.inner.create(path, text).await
        }
        async fn delete(&self, doc: &DocumentRef) -> tabula_core::VaultResult<()> {
            self.inner.delete(doc).await
        }
    }

    let vault: Arc<dyn Vault> = Arc::new(StaleCacheVault {
        inner: MemoryVault::new()
            .with_document("wines/riesling.md", "---\nregion: rheingau\n---\ncurrent\n"),
        stale: "---\nregion: mosel\n---\nstale\n".to_string(),
    });
    let source = directory_source(vault.clone(), "wines");
    let doc = DocumentRef::new("wines/riesling.md");

    let err = source
        .set_link(&doc, "strain", &["Riesling".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SourceError::Vault(tabula_core::VaultError::StaleWrite { .. })
    ));

    // The document was not touched
    assert_eq!(
        vault.read(&doc).await.unwrap(),
        "---\nregion: rheingau\n---\ncurrent\n"
    );
}

#[tokio::test]
async fn mutating_missing_document_fails() {
    let vault = wine_vault();
    let source = directory_source(vault, "wines");
    let gone = DocumentRef::new("wines/gone.md");

    assert!(source
        .set_data(&gone, "region", &FieldValue::from("mosel"))
        .await
        .is_err());
    assert!(source.delete_row(&gone).await.is_err());
}

#[tokio::test]
async fn ignore_filter_applies_to_every_source_type() {
    let vault: Arc<dyn Vault> = Arc::new(
        MemoryVault::new()
            .with_document("wines/riesling.md", "---\ntags: wine\n---\n")
            .with_document("wines/drafts/new.md", "---\ntags: wine\n---\n")
            .with_document("current.md", "[[riesling]] [[new]]\n"),
    );
    let filters = IgnoreFilters::new(&["drafts"]).unwrap();

    let specs = vec![
        SourceSpec::Directory {
            path: PathBuf::from("wines"),
        },
        SourceSpec::Tags {
            tags: vec!["wine".to_string()],
        },
        SourceSpec::Related {
            anchor: DocumentRef::new("current.md"),
            tags: vec![],
        },
    ];

    for spec in specs {
        let source = Source::new(0, spec, vault.clone(), filters.clone());
        let records = source.load_records().await.unwrap();
        assert!(
            records.iter().all(|r| !r.file.to_string().contains("drafts")),
            "ignored document leaked through {:?}",
            source.spec()
        );
    }
}

#[tokio::test]
async fn table_concatenates_sources_in_order() {
    let vault = wine_vault();
    let config = TableBlockConfig::parse(
        "sources:\n- type: directory\n  path: strains\n- type: directory\n  path: wines\n",
    )
    .unwrap();

    let table = Table::open(
        config,
        vault,
        IgnoreFilters::none(),
        WorkspaceContext::fixed(DocumentRef::new("current.md")),
    )
    .await
    .unwrap();

    let records = table.load_data().await.unwrap();
    let paths: Vec<_> = records.iter().map(|r| r.file.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "strains/Nebbiolo.md",
            "strains/Riesling.md",
            "wines/barolo.md",
            "wines/riesling.md",
        ]
    );
}

#[tokio::test]
async fn autocomplete_lists_candidate_names() {
    let vault = wine_vault();
    let config = TableBlockConfig::parse(
        r#"
sources:
- type: directory
  path: wines
fields:
- name: region
- name: strain
  type: link
  sources:
  - type: tags
    tags: [strain]
"#,
    )
    .unwrap();

    let table = Table::open(
        config,
        vault,
        IgnoreFilters::none(),
        WorkspaceContext::fixed(DocumentRef::new("current.md")),
    )
    .await
    .unwrap();

    let names = table.autocomplete("strain").await.unwrap();
    assert_eq!(names, vec!["Nebbiolo".to_string(), "Riesling".to_string()]);

    let err = table.autocomplete("region").await.unwrap_err();
    assert!(matches!(err, SourceError::NotALinkField(_)));
}

#[tokio::test]
async fn table_routes_mutations_by_source_id() {
    let vault = wine_vault();
    let config =
        TableBlockConfig::parse("sources:\n- type: directory\n  path: wines\n").unwrap();

    let table = Table::open(
        config,
        vault.clone(),
        IgnoreFilters::none(),
        WorkspaceContext::fixed(DocumentRef::new("current.md")),
    )
    .await
    .unwrap();

    let records = table.load_data().await.unwrap();
    let record = &records[1];
    assert_eq!(record.file, DocumentRef::new("wines/riesling.md"));

    table
        .set_link(
            &record.source,
            &record.file,
            "strain",
            &["Riesling".to_string()],
        )
        .await
        .unwrap();
    assert!(vault
        .read(&record.file)
        .await
        .unwrap()
        .contains("strain: '[[Riesling]]'"));

    let err = table
        .set_link(
            &tabula_core::SourceId::from("9:directory:nope"),
            &record.file,
            "strain",
            &[],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::UnknownSource(_)));
}

#[tokio::test]
async fn table_add_row_appears_in_next_load() {
    let vault = wine_vault();
    let config =
        TableBlockConfig::parse("sources:\n- type: directory\n  path: wines\n").unwrap();

    let table = Table::open(
        config,
        vault,
        IgnoreFilters::none(),
        WorkspaceContext::fixed(DocumentRef::new("current.md")),
    )
    .await
    .unwrap();

    let id = table.sources()[0].id().clone();
    let doc = table.add_row(&id, "gruner").await.unwrap();
    assert_eq!(doc, DocumentRef::new("wines/gruner.md"));

    let records = table.load_data().await.unwrap();
    assert!(records.iter().any(|r| r.file == doc));
}
