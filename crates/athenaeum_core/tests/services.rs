use athenaeum_core::db::open_db_in_memory;
use athenaeum_core::service::librarian::{
    BLANK_LEDGER_REPLY, FLICKERING_LIGHT_REPLY, SILENT_ARCHIVE_REPLY, SYNTHESIS_FAILED_REPLY,
};
use athenaeum_core::{
    AdminSession, AdminSortField, ArchiveService, ArchiveServiceError, ArchiveStore, BookDraft,
    Discipline, DisciplineFilter, EpiphanySortField, GeneratedImage, GenerativeModel,
    LedgerService, LedgerServiceError, LedgerStore, Librarian, ModelError, OfflineModel,
    SlotStore, SortOrder, SqliteSlotStore, TextRequest, ANONYMOUS_SEEKER, EPIPHANIES_SLOT,
    PLACEHOLDER_COVER_URL,
};
use std::cell::RefCell;

/// Scripted model that records every prompt it receives.
#[derive(Default)]
struct ScriptedModel {
    text: Option<Result<String, ModelError>>,
    image: Option<Result<Option<GeneratedImage>, ModelError>>,
    prompts: RefCell<Vec<String>>,
}

impl GenerativeModel for ScriptedModel {
    fn generate_text(&self, request: &TextRequest) -> Result<String, ModelError> {
        self.prompts.borrow_mut().push(request.prompt.clone());
        self.text
            .clone()
            .unwrap_or_else(|| Err(ModelError::Unavailable("unscripted".to_string())))
    }

    fn generate_image(&self, prompt: &str) -> Result<Option<GeneratedImage>, ModelError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.image
            .clone()
            .unwrap_or_else(|| Err(ModelError::Unavailable("unscripted".to_string())))
    }
}

fn text_model(reply: Result<&str, ModelError>) -> ScriptedModel {
    ScriptedModel {
        text: Some(reply.map(str::to_string)),
        ..ScriptedModel::default()
    }
}

fn image_model(reply: Result<Option<GeneratedImage>, ModelError>) -> ScriptedModel {
    ScriptedModel {
        image: Some(reply),
        ..ScriptedModel::default()
    }
}

fn draft(title: &str) -> BookDraft {
    BookDraft::new(title, "Paracelsus", Discipline::Esoteric)
}

#[test]
fn archive_writes_require_curator_session() {
    let conn = open_db_in_memory().unwrap();
    let service = ArchiveService::new(
        ArchiveStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(OfflineModel),
    );

    let err = service.add_book(&AdminSession::guest(), draft("Archidoxis")).unwrap_err();
    assert!(matches!(err, ArchiveServiceError::NotAuthorized));
    let err = service.delete_book(&AdminSession::guest(), "1").unwrap_err();
    assert!(matches!(err, ArchiveServiceError::NotAuthorized));
    assert_eq!(service.store().list_books().unwrap().len(), 4);
}

#[test]
fn add_book_rejects_blank_fields_and_non_pdf_documents_before_store() {
    let conn = open_db_in_memory().unwrap();
    let service = ArchiveService::new(
        ArchiveStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(OfflineModel),
    );
    let curator = AdminSession::curator();

    let err = service.add_book(&curator, draft("   ")).unwrap_err();
    assert!(matches!(err, ArchiveServiceError::MissingField("title")));

    let mut no_author = draft("Archidoxis");
    no_author.author = String::new();
    let err = service.add_book(&curator, no_author).unwrap_err();
    assert!(matches!(err, ArchiveServiceError::MissingField("author")));

    let mut image_doc = draft("Archidoxis");
    image_doc.file_url = "data:image/png;base64,AAAA".to_string();
    let err = service.add_book(&curator, image_doc).unwrap_err();
    assert!(matches!(err, ArchiveServiceError::UnsupportedDocument(ref mime) if mime == "image/png"));

    assert_eq!(service.store().list_books().unwrap().len(), 4);
}

#[test]
fn add_book_uses_generated_cover_as_data_url() {
    let conn = open_db_in_memory().unwrap();
    let model = image_model(Ok(Some(GeneratedImage {
        mime_type: "image/png".to_string(),
        data: "iVBORw0KGgo=".to_string(),
    })));
    let service = ArchiveService::new(
        ArchiveStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(&model),
    );

    let mut with_pdf = draft("Archidoxis");
    with_pdf.file_url = "data:application/pdf;base64,JVBERi0x".to_string();
    let book = service.add_book(&AdminSession::curator(), with_pdf).unwrap();

    assert_eq!(book.cover_url, "data:image/png;base64,iVBORw0KGgo=");
    assert!(book.file_url.starts_with("data:application/pdf"));
    let prompts = model.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Archidoxis\""));
    assert!(prompts[0].contains("\"Esoteric\""));
}

#[test]
fn add_book_falls_back_to_placeholder_cover() {
    let conn = open_db_in_memory().unwrap();
    for model in [
        image_model(Err(ModelError::Transport("offline".to_string()))),
        image_model(Ok(None)),
    ] {
        let service = ArchiveService::new(
            ArchiveStore::new(SqliteSlotStore::new(&conn)),
            Librarian::new(&model),
        );
        let book = service
            .add_book(&AdminSession::curator(), draft("Opus Paramirum"))
            .unwrap();
        assert_eq!(book.cover_url, PLACEHOLDER_COVER_URL);
        assert_eq!(book.file_url, "#");
    }
}

#[test]
fn supplied_cover_skips_generation() {
    let conn = open_db_in_memory().unwrap();
    let model = ScriptedModel::default();
    let service = ArchiveService::new(
        ArchiveStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(&model),
    );
    let mut with_cover = draft("Astronomia Magna");
    with_cover.cover_url = "https://example.org/cover.jpg".to_string();

    let book = service.add_book(&AdminSession::curator(), with_cover).unwrap();
    assert_eq!(book.cover_url, "https://example.org/cover.jpg");
    assert!(model.prompts.borrow().is_empty());
}

#[test]
fn catalog_and_admin_views_apply_queries() {
    let conn = open_db_in_memory().unwrap();
    let service = ArchiveService::new(
        ArchiveStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(OfflineModel),
    );

    let philosophy = service
        .catalog(DisciplineFilter::Only(Discipline::Philosophy), "")
        .unwrap();
    assert_eq!(philosophy.len(), 2);

    let listing = service
        .admin_listing("the", AdminSortField::Title, SortOrder::Ascending)
        .unwrap();
    let titles: Vec<_> = listing.iter().map(|book| book.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "The Hero with a Thousand Faces",
            "The Kybalion",
            "The Origins of Totalitarianism"
        ]
    );
}

#[test]
fn consult_rejects_blank_query_and_falls_back_on_failure() {
    let conn = open_db_in_memory().unwrap();
    let failing = text_model(Err(ModelError::Transport("timeout".to_string())));
    let service = ArchiveService::new(
        ArchiveStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(&failing),
    );

    assert!(matches!(
        service.consult("  ").unwrap_err(),
        ArchiveServiceError::MissingField("query")
    ));
    assert!(failing.prompts.borrow().is_empty());
    assert_eq!(service.consult("stoicism").unwrap(), FLICKERING_LIGHT_REPLY);
}

#[test]
fn consult_replaces_empty_reply_and_passes_answers_through() {
    let conn = open_db_in_memory().unwrap();
    let silent = text_model(Ok("  "));
    let service = ArchiveService::new(
        ArchiveStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(&silent),
    );
    assert_eq!(service.consult("stoicism").unwrap(), SILENT_ARCHIVE_REPLY);
    assert!(silent.prompts.borrow()[0].contains("Marcus Aurelius"));

    let wise = text_model(Ok("Read Meditations."));
    let service = ArchiveService::new(
        ArchiveStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(&wise),
    );
    assert_eq!(service.consult("stoicism").unwrap(), "Read Meditations.");
}

#[test]
fn ledger_submit_rejects_blank_content_before_store() {
    let conn = open_db_in_memory().unwrap();
    let slots = SqliteSlotStore::new(&conn);
    let service = LedgerService::new(LedgerStore::new(&slots), Librarian::new(OfflineModel));

    let err = service.submit("", "x").unwrap_err();
    assert!(matches!(err, LedgerServiceError::EmptyContent));
    assert!(matches!(
        service.submit(" \n\t", "x").unwrap_err(),
        LedgerServiceError::EmptyContent
    ));
    assert!(slots.read_slot(EPIPHANIES_SLOT).unwrap().is_none());

    let entry = service.submit("hello", "").unwrap();
    assert_eq!(entry.seeker, ANONYMOUS_SEEKER);
    assert_eq!(service.list().unwrap(), vec![entry]);
}

#[test]
fn synthesis_skips_model_for_empty_ledger_and_falls_back_on_failure() {
    let conn = open_db_in_memory().unwrap();
    let failing = text_model(Err(ModelError::InvalidResponse("no candidates".to_string())));
    let service = LedgerService::new(
        LedgerStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(&failing),
    );

    assert_eq!(service.synthesize().unwrap(), BLANK_LEDGER_REPLY);
    assert!(failing.prompts.borrow().is_empty());

    service.submit("Darkness precedes dawn.", "Juan").unwrap();
    assert_eq!(service.synthesize().unwrap(), SYNTHESIS_FAILED_REPLY);
    assert!(failing.prompts.borrow()[0].contains("Darkness precedes dawn."));
}

#[test]
fn ledger_resonance_and_sorted_listing() {
    let conn = open_db_in_memory().unwrap();
    let model = text_model(Ok("All paths converge."));
    let service = LedgerService::new(
        LedgerStore::new(SqliteSlotStore::new(&conn)),
        Librarian::new(&model),
    );
    let quiet = service.submit("Quiet", "A").unwrap();
    let loud = service.submit("Loud", "B").unwrap();
    service.resonate(&quiet.id).unwrap();
    service.resonate(&quiet.id).unwrap();
    service.resonate(&loud.id).unwrap();

    let ranked = service
        .list_sorted(EpiphanySortField::Resonance, SortOrder::Descending)
        .unwrap();
    assert_eq!(ranked[0].id, quiet.id);
    assert_eq!(ranked[0].resonance, 2);
    assert_eq!(ranked[1].resonance, 1);
    assert_eq!(service.synthesize().unwrap(), "All paths converge.");
}
