//! The development pipeline
//!
//! One run, in order:
//!
//! 1. the project manager assigns tasks
//! 2. the backend agent writes `backend/main.py`
//! 3. the web agent writes `web_app/index.js`
//! 4. the backend agent runs the tests into `backend/test_results.log`
//! 5. if the output has no `FAILED`, the changes are published to a new
//!    branch
//!
//! Every generated file is written to disk and added to the vector index.

use forge_agent::{Crew, Role, Runner};
use forge_fs::{NormalizedPath, ProjectLayout, ProjectPath};
use forge_git::{Publisher, current_branch_name};
use forge_vector::VectorStore;

use crate::{LogWindow, Result, tests_passed};

/// Commit message used for published changes.
pub const COMMIT_MESSAGE: &str = "AI-generated update";

const ASSIGN_PROMPT: &str = "Start development. Assign tasks.";
const BACKEND_PROMPT: &str = "Generate FastAPI backend code.";
const WEB_PROMPT: &str = "Generate React/Next.js frontend.";
const TEST_PROMPT: &str = "Run backend tests.";

/// What a pipeline run did.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// The project manager's task assignment
    pub plan: String,
    /// Files written during the run, in order
    pub files: Vec<NormalizedPath>,
    pub tests_passed: bool,
    /// Branch the changes were pushed to, if they were
    pub published_branch: Option<String>,
}

/// Drives the crew through one development run.
pub struct Pipeline<'a> {
    layout: ProjectLayout,
    crew: Crew,
    runner: Box<dyn Runner + 'a>,
    store: VectorStore,
    publisher: Option<Box<dyn Publisher + 'a>>,
    branch: String,
    log: &'a dyn LogWindow,
}

impl<'a> Pipeline<'a> {
    /// A pipeline that does not publish. See [`Pipeline::with_publisher`].
    pub fn new(
        layout: ProjectLayout,
        crew: Crew,
        runner: impl Runner + 'a,
        store: VectorStore,
        log: &'a dyn LogWindow,
    ) -> Self {
        Self {
            layout,
            crew,
            runner: Box::new(runner),
            store,
            publisher: None,
            branch: current_branch_name(),
            log,
        }
    }

    pub fn with_publisher(mut self, publisher: impl Publisher + 'a) -> Self {
        self.publisher = Some(Box::new(publisher));
        self
    }

    /// Publish to `branch` instead of `ai-update-<pid>`.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    /// Hand the index back once the run is over.
    pub fn into_store(self) -> VectorStore {
        self.store
    }

    fn ask(&self, role: Role, prompt: &str) -> Result<String> {
        let agent = self.crew.get(role);
        tracing::debug!(agent = %agent.name, prompt, "Running agent");
        Ok(self.runner.run(agent, prompt)?.final_output)
    }

    fn save(&mut self, which: ProjectPath, content: &str) -> Result<NormalizedPath> {
        let path = self.layout.path(which);
        self.store.save_to_project(&path, content)?;
        Ok(path)
    }

    /// Ask the backend agent to run the tests and record the output.
    ///
    /// Returns whether the tests passed and where the output was written.
    pub fn run_tests(&mut self) -> Result<(bool, NormalizedPath)> {
        self.log.append("[+] Running tests...");

        let output = self.ask(Role::Backend, TEST_PROMPT)?;
        let path = self.save(ProjectPath::TestResults, &output)?;

        let passed = tests_passed(&output);
        if !passed {
            self.log.append("[-] Tests failed. AI will request fixes.");
        }
        Ok((passed, path))
    }

    fn publish(&self) -> Result<Option<String>> {
        let Some(publisher) = &self.publisher else {
            self.log
                .append("[GitHub] Publishing disabled, skipping branch creation.");
            return Ok(None);
        };

        publisher.create_branch(&self.branch)?;
        self.log
            .append(&format!("[GitHub] Created new branch: {}", self.branch));

        publisher.commit_and_push(&self.branch, COMMIT_MESSAGE)?;
        self.log
            .append(&format!("[GitHub] Pushed changes to {}", self.branch));

        self.log.append("[GitHub] AI changes committed.");
        Ok(Some(self.branch.clone()))
    }

    /// Execute the whole run.
    pub fn run(&mut self) -> Result<PipelineReport> {
        self.log.append("[+] AI Development System Initializing...");
        self.layout.prepare()?;

        self.log.append("[+] Project Manager assigning tasks...");
        let plan = self.ask(Role::ProjectManager, ASSIGN_PROMPT)?;

        let mut files = Vec::new();

        self.log.append("[+] Backend Agent developing backend...");
        let backend = self.ask(Role::Backend, BACKEND_PROMPT)?;
        files.push(self.save(ProjectPath::BackendMain, &backend)?);

        self.log.append("[+] Web Agent developing web app...");
        let web = self.ask(Role::Web, WEB_PROMPT)?;
        files.push(self.save(ProjectPath::WebAppIndex, &web)?);

        let (passed, results) = self.run_tests()?;
        files.push(results);

        let published_branch = if passed { self.publish()? } else { None };

        self.log.append("[+] AI Development Complete!");
        tracing::info!(
            files = files.len(),
            tests_passed = passed,
            published = published_branch.is_some(),
            "Pipeline finished"
        );

        Ok(PipelineReport {
            plan,
            files,
            tests_passed: passed,
            published_branch,
        })
    }
}
