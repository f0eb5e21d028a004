//! LAS import workflow.
//!
//! [`ImportOrchestrator`] drives one import from file selection to the
//! storage service:
//!
//! ```text
//! Idle -> FileSelected -> Parsed{valid} -> CurvesConfigured -> Importing -> Done | Failed
//! ```
//!
//! A failed import returns to `CurvesConfigured` on retry without parsing
//! the file again. Cancelling at any point discards the parsed file and any
//! submission still in flight.

use std::collections::BTreeSet;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use serde::Serialize;
use thiserror::Error;

use crate::classify::{classify, is_depth_mnemonic, CurveGroup};
use crate::parsers::{LasFile, LasParser, ParseError};
use crate::storage::{
    CreateWellLogRequest, DepthValue, LogRunId, LogType, WellLogCurve, WellLogStore,
};
use crate::tracks::{build_tracks, LogTrack, TrackOptions};
use crate::validate::{validate_las_file, ValidationReport};

/// Where an import currently stands
#[derive(Clone, Debug, PartialEq)]
pub enum ImportState {
    Idle,
    /// A file was chosen; parsing is pending or failed
    FileSelected,
    Parsed {
        valid: bool,
    },
    CurvesConfigured,
    Importing,
    Done(ImportSummary),
    Failed(String),
}

impl ImportState {
    pub fn name(&self) -> &'static str {
        match self {
            ImportState::Idle => "idle",
            ImportState::FileSelected => "file selected",
            ImportState::Parsed { .. } => "parsed",
            ImportState::CurvesConfigured => "curves configured",
            ImportState::Importing => "importing",
            ImportState::Done(_) => "done",
            ImportState::Failed(_) => "failed",
        }
    }
}

/// Result of a successful import
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportSummary {
    pub log_run_id: LogRunId,
    pub curves_imported: usize,
    pub data_points_imported: usize,
}

/// User-editable fields of the log run being created
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportSettings {
    pub well_id: String,
    pub run_name: String,
    pub log_type: LogType,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },
    #[error("failed to parse {file}: {source}")]
    Parse { file: String, source: ParseError },
    #[error("file has blocking validation errors: {0}")]
    Blocked(String),
    #[error("no data curves selected for import")]
    NoCurvesSelected,
    #[error("a well must be chosen before importing")]
    MissingWellId,
    #[error("import failed: {0}")]
    Store(String),
}

/// Default log-run name: `"<well> - <file>"`, else the file name without its extension
pub fn default_run_name(well_name: Option<&str>, file_name: &str) -> String {
    match well_name.map(str::trim).filter(|w| !w.is_empty()) {
        Some(well) => format!("{} - {}", well, file_name),
        None => file_name
            .strip_suffix(".las")
            .or_else(|| file_name.strip_suffix(".LAS"))
            .unwrap_or(file_name)
            .to_string(),
    }
}

/// Send a request and summarize the outcome; runs on the import thread
fn submit(
    store: &dyn WellLogStore,
    tenant_id: &str,
    request: &CreateWellLogRequest,
) -> Result<ImportSummary, String> {
    match store.create_well_log(tenant_id, request) {
        Ok(log_run_id) => {
            tracing::info!("Imported log run {} ({})", log_run_id, request.name);
            Ok(ImportSummary {
                log_run_id,
                curves_imported: request.curves.len(),
                data_points_imported: request.data_point_count(),
            })
        }
        Err(e) => {
            tracing::warn!("Import of '{}' failed: {}", request.name, e);
            Err(e.to_string())
        }
    }
}

pub struct ImportOrchestrator {
    state: ImportState,
    file_name: String,
    file_size: u64,
    file: Option<LasFile>,
    report: Option<ValidationReport>,
    groups: Vec<CurveGroup>,
    selected: BTreeSet<String>,
    settings: ImportSettings,
    parse_error: Option<ParseError>,
    last_error: Option<String>,
    receiver: Option<Receiver<Result<ImportSummary, String>>>,
}

impl Default for ImportOrchestrator {
    fn default() -> Self {
        Self::new(LogType::default())
    }
}

impl ImportOrchestrator {
    pub fn new(default_log_type: LogType) -> Self {
        Self {
            state: ImportState::Idle,
            file_name: String::new(),
            file_size: 0,
            file: None,
            report: None,
            groups: Vec::new(),
            selected: BTreeSet::new(),
            settings: ImportSettings {
                log_type: default_log_type,
                ..Default::default()
            },
            parse_error: None,
            last_error: None,
            receiver: None,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    pub fn file(&self) -> Option<&LasFile> {
        self.file.as_ref()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    pub fn groups(&self) -> &[CurveGroup] {
        &self.groups
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, mnemonic: &str) -> bool {
        self.selected.contains(mnemonic)
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ImportSettings {
        &mut self.settings
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        self.parse_error.as_ref()
    }

    /// Message of the last failed submission
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, ImportState::Importing)
    }

    /// True once a file is parsed without blocking errors
    pub fn can_configure(&self) -> bool {
        matches!(
            self.state,
            ImportState::Parsed { valid: true }
                | ImportState::CurvesConfigured
                | ImportState::Failed(_)
        ) && self.file.is_some()
    }

    fn transition(&mut self, next: ImportState) {
        tracing::debug!("Import state: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    fn invalid(&self, action: &'static str) -> ImportError {
        ImportError::InvalidState {
            action,
            state: self.state.name(),
        }
    }

    // ------------------------------------------------------------------------
    // File selection
    // ------------------------------------------------------------------------

    /// Mark a file as chosen; any previous file is discarded
    pub fn begin_file(&mut self, file_name: &str, file_size: u64) -> Result<(), ImportError> {
        if self.is_busy() {
            return Err(self.invalid("select a file"));
        }
        self.clear();
        self.file_name = file_name.to_string();
        self.file_size = file_size;
        self.transition(ImportState::FileSelected);
        Ok(())
    }

    /// Select a file and parse its contents in place
    pub fn select_file(&mut self, file_name: &str, bytes: &[u8]) -> Result<&ValidationReport, ImportError> {
        self.begin_file(file_name, bytes.len() as u64)?;
        match LasParser::default().parse_bytes(bytes) {
            Ok(file) => self.accept_parsed(file),
            Err(e) => Err(self.reject_parsed(e)),
        }
    }

    /// Record a parse failure; the file stays selected so the error can be shown
    pub fn reject_parsed(&mut self, error: ParseError) -> ImportError {
        tracing::warn!("Failed to parse {}: {}", self.file_name, error);
        self.parse_error = Some(error.clone());
        ImportError::Parse {
            file: self.file_name.clone(),
            source: error,
        }
    }

    /// Take a parsed file: validate, classify and select every curve
    pub fn accept_parsed(&mut self, file: LasFile) -> Result<&ValidationReport, ImportError> {
        if self.state != ImportState::FileSelected {
            return Err(self.invalid("accept a parsed file"));
        }

        let report = validate_las_file(&file);
        self.groups = classify(&file.curves);
        self.selected = file.curves.iter().map(|c| c.mnemonic.clone()).collect();
        self.settings.run_name = default_run_name(file.well.well_name.as_deref(), &self.file_name);
        self.parse_error = None;
        self.file = Some(file);

        let valid = report.valid;
        self.transition(ImportState::Parsed { valid });
        Ok(&*self.report.insert(report))
    }

    // ------------------------------------------------------------------------
    // Curve selection
    // ------------------------------------------------------------------------

    fn selection_open(&self) -> bool {
        matches!(
            self.state,
            ImportState::Parsed { .. } | ImportState::CurvesConfigured | ImportState::Failed(_)
        )
    }

    pub fn toggle_curve(&mut self, mnemonic: &str) {
        if !self.selection_open() {
            return;
        }
        if !self.selected.remove(mnemonic) {
            self.selected.insert(mnemonic.to_string());
        }
    }

    pub fn select_all(&mut self) {
        if let (true, Some(file)) = (self.selection_open(), &self.file) {
            self.selected = file.curves.iter().map(|c| c.mnemonic.clone()).collect();
        }
    }

    pub fn deselect_all(&mut self) {
        if self.selection_open() {
            self.selected.clear();
        }
    }

    /// Whether a curve is the file's index curve and so never imported as data
    fn is_index_curve(file: &LasFile, mnemonic: &str) -> bool {
        is_depth_mnemonic(mnemonic)
            || file
                .depth_curve()
                .is_some_and(|c| c.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    /// Selected data curves in file order, one per mnemonic
    fn selected_data_curves<'a>(&'a self, file: &'a LasFile) -> Vec<&'a str> {
        let mut names: Vec<&str> = Vec::new();
        for curve in &file.curves {
            let name = curve.mnemonic.as_str();
            if self.selected.contains(name)
                && !Self::is_index_curve(file, name)
                && !names.contains(&name)
            {
                names.push(name);
            }
        }
        names
    }

    /// Lock in the curve selection
    pub fn configure(&mut self) -> Result<(), ImportError> {
        if !self.selection_open() {
            return Err(self.invalid("configure curves"));
        }
        let (Some(file), Some(report)) = (&self.file, &self.report) else {
            return Err(self.invalid("configure curves"));
        };
        if !report.errors.is_empty() {
            return Err(ImportError::Blocked(report.errors.join("; ")));
        }
        if self.selected_data_curves(file).is_empty() {
            return Err(ImportError::NoCurvesSelected);
        }
        self.transition(ImportState::CurvesConfigured);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Payload for the storage service: selected data curves with null samples dropped
    pub fn build_request(&self) -> Result<CreateWellLogRequest, ImportError> {
        let Some(file) = &self.file else {
            return Err(self.invalid("build an import request"));
        };
        let well_id = self.settings.well_id.trim();
        if well_id.is_empty() {
            return Err(ImportError::MissingWellId);
        }

        let depths = file.depth_array();
        let curves: Vec<WellLogCurve> = self
            .selected_data_curves(file)
            .into_iter()
            .filter_map(|name| {
                let definition = file.curve(name)?;
                let data = file.curve_data(name)?;
                Some(WellLogCurve {
                    name: definition.mnemonic.clone(),
                    unit: definition.unit.clone(),
                    description: definition.description.clone(),
                    data: depths
                        .iter()
                        .zip(data)
                        .filter_map(|(depth, value)| match (depth, value) {
                            (Some(depth), Some(value)) => Some(DepthValue {
                                depth: *depth,
                                value: *value,
                            }),
                            _ => None,
                        })
                        .collect(),
                })
            })
            .collect();
        if curves.is_empty() {
            return Err(ImportError::NoCurvesSelected);
        }

        let (top_depth, bottom_depth) = file.depth_range().unwrap_or((0.0, 0.0));
        let run_name = self.settings.run_name.trim();

        Ok(CreateWellLogRequest {
            well_id: well_id.to_string(),
            name: if run_name.is_empty() {
                self.file_name.clone()
            } else {
                run_name.to_string()
            },
            log_type: self.settings.log_type,
            top_depth,
            bottom_depth,
            curves,
            source_file_name: self.file_name.clone(),
            las_version: Some(file.version.version.clone()),
            service_company: file.well.service_company.clone(),
            data_format: "LAS".to_string(),
            available_curves: file
                .curves
                .iter()
                .map(|c| c.mnemonic.clone())
                .filter(|m| self.selected.contains(m))
                .fold(Vec::new(), |mut acc, m| {
                    if !acc.contains(&m) {
                        acc.push(m);
                    }
                    acc
                }),
        })
    }

    fn prepare_import(&mut self) -> Result<CreateWellLogRequest, ImportError> {
        if self.state != ImportState::CurvesConfigured {
            return Err(self.invalid("start an import"));
        }
        let request = self.build_request()?;
        self.last_error = None;
        self.transition(ImportState::Importing);
        Ok(request)
    }

    fn finish(&mut self, outcome: Result<ImportSummary, String>) {
        match outcome {
            Ok(summary) => {
                self.file = None;
                self.transition(ImportState::Done(summary));
            }
            Err(message) => {
                self.last_error = Some(message.clone());
                self.transition(ImportState::Failed(message));
            }
        }
    }

    /// Submit on a background thread; call [`poll`](Self::poll) to pick up the result
    pub fn start_import(
        &mut self,
        store: Arc<dyn WellLogStore>,
        tenant_id: &str,
    ) -> Result<(), ImportError> {
        let request = self.prepare_import()?;
        let tenant_id = tenant_id.to_string();

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        thread::spawn(move || {
            let outcome = submit(store.as_ref(), &tenant_id, &request);
            // The receiver is gone if the import was cancelled
            let _ = sender.send(outcome);
        });
        Ok(())
    }

    /// Check for a finished background import. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };
        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err("import worker stopped unexpectedly".to_string()),
        };
        self.receiver = None;
        self.finish(outcome);
        true
    }

    /// Submit on the calling thread
    pub fn import_blocking(
        &mut self,
        store: &dyn WellLogStore,
        tenant_id: &str,
    ) -> Result<ImportSummary, ImportError> {
        let request = self.prepare_import()?;
        let outcome = submit(store, tenant_id, &request);
        self.finish(outcome.clone());
        outcome.map_err(ImportError::Store)
    }

    /// Go back to curve configuration after a failed import; the parsed file is kept
    pub fn retry(&mut self) -> Result<(), ImportError> {
        if !matches!(self.state, ImportState::Failed(_)) || self.file.is_none() {
            return Err(self.invalid("retry"));
        }
        self.transition(ImportState::CurvesConfigured);
        Ok(())
    }

    fn clear(&mut self) {
        self.receiver = None;
        self.file = None;
        self.report = None;
        self.groups.clear();
        self.selected.clear();
        self.parse_error = None;
        self.last_error = None;
        self.file_name.clear();
        self.file_size = 0;
        self.settings.run_name.clear();
    }

    /// Abandon the import. An in-flight submission is detached and its result dropped.
    pub fn cancel(&mut self) {
        if self.is_busy() {
            tracing::info!("Import of {} cancelled", self.file_name);
        }
        self.clear();
        self.transition(ImportState::Idle);
    }

    /// Tracks for previewing the selected curves
    pub fn preview_tracks(&self, options: &TrackOptions) -> Vec<LogTrack> {
        match &self.file {
            Some(file) => build_tracks(file, &self.groups, Some(&self.selected), options),
            None => Vec::new(),
        }
    }

    /// The parsed file cut down to the selected curves
    pub fn selected_subset(&self) -> Option<LasFile> {
        let file = self.file.as_ref()?;
        let names: Vec<&str> = self.selected.iter().map(String::as_str).collect();
        Some(file.subset(&names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreError;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    const SIMPLE: &str = "~V\nVERS. 2.0:\n~W\nNULL. -999.25:\nWELL. W-7:\nSRVC. ACME LOGGING:\n~C\nDEPT.M\nGR.GAPI: Gamma\nILD.OHMM\n~A\n100.0 50.0 2.0\n101.0 -999.25 20.0\n102.0 60.0 -999.25\n";

    /// Store that records requests and fails while `fail` is set
    #[derive(Default)]
    struct MemoryStore {
        requests: Mutex<Vec<(String, CreateWellLogRequest)>>,
        fail: Mutex<bool>,
    }

    impl WellLogStore for MemoryStore {
        fn create_well_log(
            &self,
            tenant_id: &str,
            request: &CreateWellLogRequest,
        ) -> Result<LogRunId, StoreError> {
            if *self.fail.lock().unwrap() {
                return Err(StoreError::Status(503));
            }
            let mut requests = self.requests.lock().unwrap();
            requests.push((tenant_id.to_string(), request.clone()));
            Ok(LogRunId(format!("run-{}", requests.len())))
        }
    }

    fn configured() -> ImportOrchestrator {
        let mut import = ImportOrchestrator::default();
        import.select_file("well.las", SIMPLE.as_bytes()).unwrap();
        import.settings_mut().well_id = "well-7".into();
        import.configure().unwrap();
        import
    }

    #[test]
    fn test_select_file_parses_and_selects_all() {
        let mut import = ImportOrchestrator::default();
        let report = import.select_file("well.las", SIMPLE.as_bytes()).unwrap();
        assert!(report.valid);
        assert_eq!(import.state(), &ImportState::Parsed { valid: true });
        assert_eq!(import.selected().len(), 3);
        assert_eq!(import.settings().run_name, "W-7 - well.las");
        assert_eq!(import.file_size(), SIMPLE.len() as u64);
        assert_eq!(import.groups().len(), 4);
    }

    #[test]
    fn test_parse_error_keeps_file_selected() {
        let mut import = ImportOrchestrator::default();
        let text = SIMPLE.replace("101.0 -999.25 20.0", "101.0 -999.25 20.0 1.0");
        let err = import.select_file("bad.las", text.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::Parse { .. }));
        assert!(err.to_string().contains("line 13"));
        assert_eq!(import.state(), &ImportState::FileSelected);
        assert!(import.parse_error().is_some());
        assert!(import.configure().is_err());
    }

    #[test]
    fn test_blocking_errors_prevent_configuration() {
        let mut import = ImportOrchestrator::default();
        let text = "~V\nVERS. 2.0:\n~C\nDEPT.M\nGR.GAPI\n~A\n-999.25 1.0\n101.0 2.0\n";
        let report = import.select_file("gaps.las", text.as_bytes()).unwrap();
        assert!(!report.valid);
        assert_eq!(import.state(), &ImportState::Parsed { valid: false });
        assert!(matches!(import.configure(), Err(ImportError::Blocked(_))));
        assert_eq!(import.settings().run_name, "gaps");
    }

    #[test]
    fn test_preview_matches_imported_curves_without_depth_mnemonic() {
        let mut import = ImportOrchestrator::default();
        let text = "~V\nVERS. 2.0:\n~W\nWELL. W-9:\n~C\nTIME.S\nGR.GAPI\n~A\n0.0 50.0\n1.0 60.0\n";
        let report = import.select_file("timed.las", text.as_bytes()).unwrap();
        assert!(report.valid);
        assert!(report.warnings[0].starts_with("No depth curve found"));

        let previewed: Vec<String> = import
            .preview_tracks(&TrackOptions::default())
            .into_iter()
            .flat_map(|t| t.curves.into_iter().map(|c| c.name))
            .collect();
        import.settings_mut().well_id = "well-9".into();
        let request = import.build_request().unwrap();
        let imported: Vec<String> = request.curves.into_iter().map(|c| c.name).collect();
        assert_eq!(previewed, vec!["GR"]);
        assert_eq!(previewed, imported);
    }

    #[test]
    fn test_selection_must_contain_data_curves() {
        let mut import = ImportOrchestrator::default();
        import.select_file("well.las", SIMPLE.as_bytes()).unwrap();
        import.deselect_all();
        assert!(matches!(import.configure(), Err(ImportError::NoCurvesSelected)));

        import.toggle_curve("DEPT");
        assert!(matches!(import.configure(), Err(ImportError::NoCurvesSelected)));

        import.toggle_curve("GR");
        assert!(import.configure().is_ok());
        assert_eq!(import.state(), &ImportState::CurvesConfigured);
    }

    #[test]
    fn test_build_request_filters_nulls_and_depth() {
        let mut import = configured();
        import.toggle_curve("ILD");
        let request = import.build_request().unwrap();

        assert_eq!(request.well_id, "well-7");
        assert_eq!(request.curves.len(), 1);
        let gr = &request.curves[0];
        assert_eq!(gr.name, "GR");
        assert_eq!(gr.description, "Gamma");
        assert_eq!(
            gr.data,
            vec![
                DepthValue { depth: 100.0, value: 50.0 },
                DepthValue { depth: 102.0, value: 60.0 }
            ]
        );
        assert_eq!((request.top_depth, request.bottom_depth), (100.0, 102.0));
        assert_eq!(request.available_curves, vec!["DEPT", "GR"]);
        assert_eq!(request.service_company.as_deref(), Some("ACME LOGGING"));
        assert_eq!(request.las_version.as_deref(), Some("2.0"));
        assert_eq!(request.data_format, "LAS");

        import.settings_mut().well_id = "  ".into();
        assert!(matches!(import.build_request(), Err(ImportError::MissingWellId)));
    }

    #[test]
    fn test_blocking_import_success() {
        let store = MemoryStore::default();
        let mut import = configured();
        let summary = import.import_blocking(&store, "tenant-1").unwrap();

        assert_eq!(summary.log_run_id, LogRunId("run-1".into()));
        assert_eq!(summary.curves_imported, 2);
        assert_eq!(summary.data_points_imported, 4);
        assert!(matches!(import.state(), ImportState::Done(_)));
        assert!(import.file().is_none());

        let requests = store.requests.lock().unwrap();
        assert_eq!(requests[0].0, "tenant-1");
    }

    #[test]
    fn test_failure_then_retry_without_reparse() {
        let store = MemoryStore::default();
        *store.fail.lock().unwrap() = true;
        let mut import = configured();

        let err = import.import_blocking(&store, "tenant-1").unwrap_err();
        assert!(err.to_string().contains("503"));
        assert!(matches!(import.state(), ImportState::Failed(_)));
        assert!(import.last_error().unwrap().contains("503"));
        assert!(import.file().is_some());

        import.retry().unwrap();
        assert_eq!(import.state(), &ImportState::CurvesConfigured);
        *store.fail.lock().unwrap() = false;
        assert!(import.import_blocking(&store, "tenant-1").is_ok());
        assert!(import.retry().is_err());
    }

    #[test]
    fn test_background_import_and_poll() {
        let store: Arc<dyn WellLogStore> = Arc::new(MemoryStore::default());
        let mut import = configured();
        import.start_import(store, "tenant-1").unwrap();
        assert!(import.is_busy());
        assert!(import.select_file("other.las", SIMPLE.as_bytes()).is_err());

        let deadline = Instant::now() + Duration::from_secs(5);
        while !import.poll() {
            assert!(Instant::now() < deadline, "import did not finish");
            thread::sleep(Duration::from_millis(5));
        }
        match import.state() {
            ImportState::Done(summary) => assert_eq!(summary.curves_imported, 2),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_cancel_discards_everything() {
        let store: Arc<dyn WellLogStore> = Arc::new(MemoryStore::default());
        let mut import = configured();
        import.start_import(store, "tenant-1").unwrap();
        import.cancel();

        assert_eq!(import.state(), &ImportState::Idle);
        assert!(import.file().is_none());
        assert!(import.selected().is_empty());
        assert!(!import.poll());
    }

    #[test]
    fn test_operations_in_wrong_state() {
        let mut import = ImportOrchestrator::default();
        let store = MemoryStore::default();
        assert!(matches!(
            import.import_blocking(&store, "t"),
            Err(ImportError::InvalidState { state: "idle", .. })
        ));
        assert!(import.configure().is_err());
        assert!(import.accept_parsed(LasFile::default()).is_err());
    }

    #[test]
    fn test_preview_tracks_follow_selection() {
        let mut import = ImportOrchestrator::default();
        import.select_file("well.las", SIMPLE.as_bytes()).unwrap();
        assert_eq!(import.preview_tracks(&TrackOptions::default()).len(), 2);
        import.toggle_curve("ILD");
        let tracks = import.preview_tracks(&TrackOptions::default());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "GR");

        let subset = import.selected_subset().unwrap();
        let names: Vec<&str> = subset.curves.iter().map(|c| c.mnemonic.as_str()).collect();
        assert_eq!(names, vec!["DEPT", "GR"]);
    }

    #[test]
    fn test_default_run_name() {
        assert_eq!(default_run_name(Some("A-1"), "run.las"), "A-1 - run.las");
        assert_eq!(default_run_name(Some("  "), "RUN.LAS"), "RUN");
        assert_eq!(default_run_name(None, "run.txt"), "run.txt");
    }
}
