//! Interactive console session.
//!
//! Asks for a folder, gathers the rename parameters for it, shows the plan
//! and applies it after confirmation. Reads whole lines from any `BufRead`
//! so the session can be scripted.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, EpisodeTitleMap, MetadataSource, SubjectMetadata};
use crate::config::{resolve_access_token, ConfigStore};
use crate::error::AppError;
use crate::output::{display_execution_report, display_plan, display_search_page, display_subject};
use crate::parser::normalize_resolution;
use crate::rename::{
    build_plan, execute_plan, PartialMatchPolicy, PartialMatchResolver, RenameParameters,
};
use crate::scanner::{ensure_directory, scan_files, ScannerError};
use crate::ui::Ui;

/// Where to get a personal access token
pub const TOKEN_URL: &str = "https://next.bgm.tv/demo/access-token";

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Scanner(#[from] ScannerError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{failed} of {total} renames failed")]
    RenameFailed { failed: usize, total: usize },

    #[error("Input closed")]
    InputClosed,

    #[error("Console I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Line-based question and answer over a reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `question` and read one trimmed answer line
    pub fn ask(&mut self, question: &str) -> Result<String, ShellError> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::InputClosed);
        }

        Ok(line.trim().to_string())
    }

    /// Ask a yes/no question. Blank means yes; `None` for anything unrecognized.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<Option<bool>, ShellError> {
        let answer = self.ask(question)?;
        Ok(parse_yes_no(&answer))
    }

    /// Ask a yes/no question until a valid answer is given
    pub fn confirm(&mut self, question: &str) -> Result<bool, ShellError> {
        loop {
            if let Some(answer) = self.ask_yes_no(question)? {
                return Ok(answer);
            }
            writeln!(self.output, "Please answer y or n.")?;
        }
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_lowercase().as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Parse an optional whole number; blank gives `None`
fn parse_optional_number(answer: &str, what: &str) -> Result<Option<u32>, ShellError> {
    if answer.is_empty() {
        return Ok(None);
    }

    answer
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ShellError::InvalidInput(format!("{} must be a whole number, got \"{}\"", what, answer)))
}

/// Asks about files that carry only an episode number
struct PromptResolver<'a, R, W> {
    prompter: &'a mut Prompter<R, W>,
    closed: bool,
}

impl<'a, R: BufRead, W: Write> PartialMatchResolver for PromptResolver<'a, R, W> {
    fn resolve(&mut self, filename: &str) -> PartialMatchPolicy {
        if self.closed {
            return PartialMatchPolicy::Unset;
        }

        let question = format!(
            "\"{}\" only has an episode number. Rename files like this anyway? (y/n, default y)",
            filename
        );

        match self.prompter.ask_yes_no(&question) {
            Ok(Some(true)) => PartialMatchPolicy::ForceRename,
            Ok(Some(false)) => PartialMatchPolicy::Skip,
            Ok(None) => {
                if let Err(e) = writeln!(self.prompter.output(), "Invalid answer, skipping this file.") {
                    warn!("Failed to write to console: {}", e);
                }
                PartialMatchPolicy::Unset
            }
            Err(ShellError::InputClosed) => {
                self.closed = true;
                PartialMatchPolicy::Unset
            }
            Err(e) => {
                warn!("Failed to read answer: {}", e);
                PartialMatchPolicy::Unset
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShellOptions {
    /// Show plans without renaming
    pub dry_run: bool,
    /// Skip the metadata questions entirely
    pub offline: bool,
}

/// One interactive session
pub struct Shell<'a, R, W> {
    prompter: Prompter<R, W>,
    ui: Ui,
    store: &'a mut ConfigStore,
    options: ShellOptions,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(prompter: Prompter<R, W>, ui: Ui, store: &'a mut ConfigStore, options: ShellOptions) -> Self {
        Self {
            prompter,
            ui,
            store,
            options,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &*self.store
    }

    /// First-run token prompt. A blank answer continues without a token and
    /// saves nothing.
    pub fn ensure_access_token(&mut self) -> Result<(), ShellError> {
        if self.options.offline || resolve_access_token(self.store()).is_some() {
            return Ok(());
        }

        writeln!(self.prompter.output(), "No Bangumi access token is configured.")?;
        writeln!(self.prompter.output(), "You can create one at {}", TOKEN_URL)?;
        let token = self.prompter.ask("Access token (blank to continue without):")?;

        if token.is_empty() {
            self.ui.info("Continuing without an access token");
            return Ok(());
        }

        self.store.set_access_token(token);
        match self.store.save() {
            Ok(()) => self.ui.success(&format!("Token saved to {}", self.store.path().display())),
            Err(e) => {
                warn!("Failed to save config: {}", e);
                self.ui.warning(&format!("Could not save the token: {}", e));
            }
        }

        Ok(())
    }

    /// Process `target` once, or ask for folders until `exit` or end of input
    pub fn run(&mut self, source: Option<&dyn MetadataSource>, target: Option<&Path>) -> Result<(), ShellError> {
        let source = if self.options.offline { None } else { source };

        if let Some(dir) = target {
            return self.process_directory(source, dir);
        }

        loop {
            let answer = match self.prompter.ask("Folder path ('exit' to quit):") {
                Ok(answer) => answer,
                Err(ShellError::InputClosed) => return Ok(()),
                Err(e) => return Err(e),
            };

            if answer.eq_ignore_ascii_case("exit") {
                info!("Session ended by user");
                return Ok(());
            }

            let answer = answer.trim_matches(|c| c == '"' || c == '\'');
            if answer.is_empty() {
                continue;
            }

            match self.process_directory(source, &PathBuf::from(answer)) {
                Ok(()) => {}
                Err(ShellError::InputClosed) => return Ok(()),
                Err(e) => {
                    let err = AppError::from(e);
                    error!("{}", err);
                    self.ui.error(&err.detailed_message());
                }
            }
        }
    }

    fn process_directory(&mut self, source: Option<&dyn MetadataSource>, dir: &Path) -> Result<(), ShellError> {
        info!("Processing {:?}", dir);
        ensure_directory(dir)?;

        let (subject, episodes) = match source {
            Some(source) if self.prompter.confirm("Fetch episode info from Bangumi? (y/n, default y)")? => {
                self.gather_metadata(source)?
            }
            _ => (None, EpisodeTitleMap::new()),
        };

        let params = self.gather_parameters(subject.as_ref(), &episodes)?;
        debug!(?params, "Rename parameters");

        let filenames = scan_files(dir)?;

        let mut policy = PartialMatchPolicy::Unset;
        let mut resolver = PromptResolver {
            prompter: &mut self.prompter,
            closed: false,
        };
        let plan = build_plan(&filenames, &episodes, &params, &mut policy, &mut resolver);
        if resolver.closed {
            return Err(ShellError::InputClosed);
        }

        display_plan(&plan, self.options.dry_run, self.prompter.output())?;

        if plan.is_empty() || self.options.dry_run {
            return Ok(());
        }

        if !self.prompter.confirm("Proceed with renaming? (y/n, default y)")? {
            self.ui.info("Cancelled, nothing was renamed");
            return Ok(());
        }

        let report = execute_plan(dir, &plan);
        display_execution_report(&report, self.prompter.output())?;

        if report.is_success() {
            self.ui.success(&format!("Renamed {} files", report.renamed.len()));
            Ok(())
        } else {
            Err(ShellError::RenameFailed {
                failed: report.failed.len(),
                total: plan.len(),
            })
        }
    }

    /// Pick a subject and fetch it. A cancelled pick continues without metadata.
    fn gather_metadata(
        &mut self,
        source: &dyn MetadataSource,
    ) -> Result<(Option<SubjectMetadata>, EpisodeTitleMap), ShellError> {
        let Some(subject_id) = self.choose_subject(source)? else {
            self.ui.info("Continuing without Bangumi data");
            return Ok((None, EpisodeTitleMap::new()));
        };

        self.ui.step(&format!("Fetching subject {}", subject_id));
        let season = source.fetch_season(subject_id);

        let Some(subject) = season.subject else {
            self.ui.step_failed();
            return Err(season
                .failure
                .unwrap_or(ApiError::NotFound(subject_id))
                .into());
        };
        self.ui.step_done();

        if let Some(failure) = season.failure {
            self.ui.warning(&format!("Episode titles unavailable: {}", failure));
        }

        display_subject(&subject, &season.episodes, self.prompter.output())?;

        Ok((Some(subject), season.episodes))
    }

    fn choose_subject(&mut self, source: &dyn MetadataSource) -> Result<Option<u32>, ShellError> {
        let answer = self
            .prompter
            .ask("Bangumi subject ID or search keywords (blank to skip):")?;

        if answer.is_empty() {
            return Ok(None);
        }

        if let Ok(id) = answer.parse::<u32>() {
            return Ok(Some(id));
        }

        self.search_subject(source, &answer)
    }

    fn search_subject(&mut self, source: &dyn MetadataSource, query: &str) -> Result<Option<u32>, ShellError> {
        let mut page_number = 1;

        loop {
            self.ui.step(&format!("Searching for \"{}\"", query));
            let page = match source.search(query, page_number) {
                Ok(page) => {
                    self.ui.step_done();
                    page
                }
                Err(e) => {
                    self.ui.step_failed();
                    return Err(e.into());
                }
            };

            display_search_page(&page, self.prompter.output())?;

            if page.results.is_empty() {
                return Ok(None);
            }

            let answer = self
                .prompter
                .ask("Pick a number, 'n' next page, 'p' previous page (blank to cancel):")?;

            match answer.to_lowercase().as_str() {
                "" => return Ok(None),
                "n" if page_number < page.total_pages => page_number += 1,
                "n" => self.ui.warning("Already on the last page"),
                "p" if page_number > 1 => page_number -= 1,
                "p" => self.ui.warning("Already on the first page"),
                other => match other.parse::<usize>() {
                    Ok(n) if (1..=page.results.len()).contains(&n) => {
                        return Ok(Some(page.results[n - 1].id));
                    }
                    _ => self.ui.warning(&format!("\"{}\" is not a valid choice", answer)),
                },
            }
        }
    }

    fn gather_parameters(
        &mut self,
        subject: Option<&SubjectMetadata>,
        episodes: &EpisodeTitleMap,
    ) -> Result<RenameParameters, ShellError> {
        let prefix = match subject {
            Some(subject)
                if self.prompter.confirm(&format!(
                    "Use \"{}\" as the name prefix? (y/n, default y)",
                    subject.display_title()
                ))? =>
            {
                subject.display_title().to_string()
            }
            _ => self.prompter.ask("Name prefix (blank for none):")?,
        };

        let subgroup_tag = Some(self.prompter.ask("Subgroup tag (blank for none):")?).filter(|t| !t.is_empty());

        let season = if self.prompter.confirm("Add a season number? (y/n, default y)")? {
            let answer = self.prompter.ask("Season number:")?;
            match parse_optional_number(&answer, "Season")? {
                Some(season) => Some(season),
                None => return Err(ShellError::InvalidInput("Season number is required".to_string())),
            }
        } else {
            None
        };

        let use_episode_titles = !episodes.is_empty()
            && self
                .prompter
                .confirm("Use episode titles from Bangumi? (y/n, default y)")?;

        let answer = self
            .prompter
            .ask("Number of the first episode (blank to keep numbering):")?;
        let numbering_offset = parse_optional_number(&answer, "Episode offset")?.unwrap_or(0);

        let answer = self
            .prompter
            .ask("Resolution for HDR files, e.g. 2160P (blank to keep detected):")?;
        let hdr_target_resolution = if answer.is_empty() {
            None
        } else {
            match normalize_resolution(&answer) {
                Some(resolution) => Some(resolution),
                None => {
                    return Err(ShellError::InvalidInput(format!(
                        "\"{}\" is not a resolution (expected something like 1080P or 4K)",
                        answer
                    )))
                }
            }
        };

        Ok(RenameParameters {
            prefix,
            subgroup_tag,
            season,
            use_episode_titles,
            numbering_offset,
            hdr_target_resolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SearchPage, SearchResult, SeasonData};
    use crate::config::{ConfigLocation, ENV_ACCESS_TOKEN, ENV_TEST_MUTEX};
    use crate::ui::UiConfig;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    struct FakeSource {
        subject: Option<SubjectMetadata>,
        episodes: EpisodeTitleMap,
        results: Vec<SearchResult>,
    }

    impl FakeSource {
        fn with_subject() -> Self {
            Self {
                subject: Some(SubjectMetadata {
                    id: 400602,
                    name: "Sousou no Frieren".to_string(),
                    name_cn: "葬送的芙莉莲".to_string(),
                    summary: "After the demon king is defeated".to_string(),
                    tags: vec!["Fantasy".to_string()],
                    rating: None,
                    air_date: None,
                    total_episodes: Some(28),
                }),
                episodes: [(1, "冒险的结束"), (2, "不必是魔法")].into_iter().collect(),
                results: vec![SearchResult {
                    id: 400602,
                    name: "Sousou no Frieren".to_string(),
                    name_cn: "葬送的芙莉莲".to_string(),
                    air_date: None,
                }],
            }
        }
    }

    impl MetadataSource for FakeSource {
        fn fetch_season(&self, subject_id: u32) -> SeasonData {
            match &self.subject {
                Some(subject) if subject.id == subject_id => SeasonData {
                    subject: Some(subject.clone()),
                    episodes: self.episodes.clone(),
                    failure: None,
                },
                _ => SeasonData {
                    failure: Some(ApiError::NotFound(subject_id)),
                    ..Default::default()
                },
            }
        }

        fn search(&self, _query: &str, page: u32) -> Result<SearchPage, ApiError> {
            Ok(SearchPage {
                page,
                total_results: self.results.len() as u32,
                total_pages: 1,
                results: self.results.clone(),
            })
        }
    }

    fn quiet_ui() -> Ui {
        Ui::with_writer(UiConfig::plain(), Box::new(io::sink()))
    }

    fn run_session(
        input: &str,
        store: &mut ConfigStore,
        source: Option<&dyn MetadataSource>,
        target: Option<&Path>,
        options: ShellOptions,
    ) -> (Result<(), ShellError>, String) {
        let prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut shell = Shell::new(prompter, quiet_ui(), store, options);
        let result = shell.run(source, target);
        let output = String::from_utf8(shell.prompter.output.clone()).unwrap();
        (result, output)
    }

    fn sorted_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no(""), Some(true));
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_prompter_eof_is_input_closed() {
        let mut prompter = Prompter::new(Cursor::new(Vec::new()), Vec::new());
        assert!(matches!(prompter.ask("Folder:"), Err(ShellError::InputClosed)));
    }

    #[test]
    fn test_confirm_repeats_until_valid() {
        let mut prompter = Prompter::new(Cursor::new(b"what\nn\n".to_vec()), Vec::new());
        assert!(!prompter.confirm("Continue?").unwrap());

        let output = String::from_utf8(prompter.output.clone()).unwrap();
        assert!(output.contains("Please answer y or n."));
    }

    #[test]
    fn test_offline_session_renames_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 初见.mp4"), "").unwrap();
        fs::write(dir.path().join("第2话 重逢.mp4"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));

        // prefix, tag, season?, season, offset, hdr, confirm
        let input = "MyShow\n\ny\n1\n\n\ny\n";
        let (result, output) = run_session(
            input,
            &mut store,
            None,
            Some(dir.path()),
            ShellOptions::default(),
        );

        result.unwrap();
        assert!(output.contains("RENAME PREVIEW"));
        assert_eq!(
            sorted_names(dir.path()),
            vec!["MyShow S01E01 初见.mp4", "MyShow S01E02 重逢.mp4", "notes.txt"]
        );
    }

    #[test]
    fn test_dry_run_leaves_files_alone() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 初见.mp4"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));

        let input = "MyShow\n\nn\n\n\n";
        let options = ShellOptions {
            dry_run: true,
            offline: true,
        };
        let (result, output) = run_session(input, &mut store, None, Some(dir.path()), options);

        result.unwrap();
        assert!(output.contains("DRY RUN"));
        assert!(output.contains("MyShow E01 初见.mp4"));
        assert_eq!(sorted_names(dir.path()), vec!["第1话 初见.mp4"]);
    }

    #[test]
    fn test_declined_confirmation_renames_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 初见.mp4"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));

        let input = "MyShow\n\nn\n\n\nn\n";
        let (result, _) = run_session(input, &mut store, None, Some(dir.path()), ShellOptions::default());

        result.unwrap();
        assert_eq!(sorted_names(dir.path()), vec!["第1话 初见.mp4"]);
    }

    #[test]
    fn test_metadata_session_uses_fetched_titles() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 旧标题 1080P.mkv"), "").unwrap();
        fs::write(dir.path().join("第2话.mkv"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));
        let source = FakeSource::with_subject();

        // fetch?, subject, use title?, tag, season?, season, titles?, offset, hdr,
        // partial?, confirm
        let input = "y\n400602\ny\nSub\ny\n1\ny\n\n\ny\ny\n";
        let (result, output) = run_session(
            input,
            &mut store,
            Some(&source),
            Some(dir.path()),
            ShellOptions::default(),
        );

        result.unwrap();
        assert!(output.contains("葬送的芙莉莲"));
        assert_eq!(
            sorted_names(dir.path()),
            vec![
                "[Sub] 葬送的芙莉莲 S01E01 冒险的结束.1080P.mkv",
                "[Sub] 葬送的芙莉莲 S01E02 不必是魔法.mkv",
            ]
        );
    }

    #[test]
    fn test_search_pick_selects_subject() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 旧标题.mkv"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));
        let source = FakeSource::with_subject();

        let input = "y\nfrieren\n1\nn\nFrieren\n\nn\ny\n\n\n";
        let options = ShellOptions {
            dry_run: true,
            offline: false,
        };
        let (result, output) = run_session(input, &mut store, Some(&source), Some(dir.path()), options);

        result.unwrap();
        assert!(output.contains("Page 1/1"));
        assert!(output.contains("Frieren E01 冒险的结束.mkv"));
    }

    #[test]
    fn test_invalid_partial_answer_skips_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话.mp4"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));

        // prefix, tag, season?, offset, hdr, partial answer
        let input = "MyShow\n\nn\n\n\nmaybe\n";
        let (result, output) = run_session(input, &mut store, None, Some(dir.path()), ShellOptions::default());

        result.unwrap();
        assert!(output.contains("Invalid answer, skipping this file."));
        assert!(output.contains("no valid answer given"));
        assert_eq!(sorted_names(dir.path()), vec!["第1话.mp4"]);
    }

    #[test]
    fn test_unknown_subject_aborts_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 初见.mp4"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));
        let source = FakeSource::with_subject();

        let (result, _) = run_session(
            "y\n1\n",
            &mut store,
            Some(&source),
            Some(dir.path()),
            ShellOptions::default(),
        );

        assert!(matches!(result, Err(ShellError::Api(ApiError::NotFound(1)))));
        assert_eq!(sorted_names(dir.path()), vec!["第1话 初见.mp4"]);
    }

    #[test]
    fn test_invalid_season_aborts_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 初见.mp4"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));

        let (result, _) = run_session(
            "MyShow\n\ny\none\n",
            &mut store,
            None,
            Some(dir.path()),
            ShellOptions::default(),
        );

        assert!(matches!(result, Err(ShellError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_hdr_resolution_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 初见.mp4"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));

        let (result, _) = run_session(
            "MyShow\n\nn\n\nultra\n",
            &mut store,
            None,
            Some(dir.path()),
            ShellOptions::default(),
        );

        assert!(matches!(result, Err(ShellError::InvalidInput(_))));
    }

    #[test]
    fn test_folder_loop_continues_after_bad_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("第1话 初见.mp4"), "").unwrap();

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));

        let input = format!(
            "/nonexistent/anime\n{}\nMyShow\n\nn\n\n\ny\nexit\n",
            dir.path().display()
        );
        let (result, _) = run_session(&input, &mut store, None, None, ShellOptions::default());

        result.unwrap();
        assert_eq!(sorted_names(dir.path()), vec!["MyShow E01 初见.mp4"]);
    }

    #[test]
    fn test_folder_loop_ends_at_eof() {
        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));

        let (result, output) = run_session("", &mut store, None, None, ShellOptions::default());

        result.unwrap();
        assert!(output.contains("Folder path"));
    }

    #[test]
    fn test_token_prompt_saves_token() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_ACCESS_TOKEN);

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));
        let path = store.path().to_path_buf();

        let prompter = Prompter::new(Cursor::new(b"secret\n".to_vec()), Vec::new());
        let mut shell = Shell::new(prompter, quiet_ui(), &mut store, ShellOptions::default());
        shell.ensure_access_token().unwrap();

        assert_eq!(shell.store().access_token(), Some("secret"));
        assert!(path.exists());
    }

    #[test]
    fn test_blank_token_saves_nothing() {
        let _lock = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_ACCESS_TOKEN);

        let config_dir = tempdir().unwrap();
        let mut store = ConfigStore::load(ConfigLocation::in_dir(config_dir.path()));
        let path = store.path().to_path_buf();

        let prompter = Prompter::new(Cursor::new(b"\n".to_vec()), Vec::new());
        let mut shell = Shell::new(prompter, quiet_ui(), &mut store, ShellOptions::default());
        shell.ensure_access_token().unwrap();

        assert!(!path.exists());
    }
}
