use crate::{
    AppResult, Command, ConfigChange, DraftInput, PreviewViewer,
    config::Config, draft_input::DRAFT_HELP,
};

use std::{sync::Arc, time::Duration};

use region_shot_core::{
    BatchStatus, CaptureBackend, CaptureEvent, ConfigRepository, DraftStep, HttpBackend,
    PreviewManager, PreviewTarget, Region, RegionDraftMachine, RegionId, RegionRepository,
    ScreenshotOrchestrator,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, instrument, warn};

/// Runs one command against the capture backend.
pub struct App<B> {
    backend: Arc<B>,
    poll_interval: Duration,
    viewer: PreviewViewer,
}

impl App<HttpBackend> {
    /// Build the app from client settings.
    #[track_caller]
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let backend = HttpBackend::new(
            config.backend.base_url.clone(),
            config.backend.request_timeout(),
        )?;

        info!(
            base_url = %backend.base_url(),
            poll_interval_ms = config.capture.poll_interval().as_millis(),
            "Region-shot starting"
        );

        Ok(Self {
            backend: Arc::new(backend),
            poll_interval: config.capture.poll_interval(),
            viewer: PreviewViewer::new(&config.preview),
        })
    }
}

impl<B: CaptureBackend> App<B> {
    /// Execute `command`. Returns `false` when the command ran but did not succeed,
    /// which only a failed single-region capture does.
    #[instrument(skip(self))]
    pub async fn run(&self, command: Command) -> AppResult<bool> {
        match command {
            Command::Regions => self.list_regions().await,
            Command::Show { id } => self.show_region(&id).await,
            Command::Define => {
                let machine = RegionDraftMachine::new(Arc::clone(&self.backend), self.poll_interval);
                self.run_draft(machine).await
            }
            Command::Edit { id } => {
                let region = RegionRepository::new(Arc::clone(&self.backend)).get(&id).await?;
                let machine =
                    RegionDraftMachine::edit(Arc::clone(&self.backend), self.poll_interval, region);
                self.run_draft(machine).await
            }
            Command::Delete { id, assume_yes } => self.delete_region(&id, assume_yes).await,
            Command::Shoot { id } => self.shoot(&id).await,
            Command::ShootAll => self.shoot_all().await,
            Command::ShowConfig => self.show_config().await,
            Command::SetConfig { changes } => self.set_config(&changes).await,
        }
    }

    async fn list_regions(&self) -> AppResult<bool> {
        let regions = RegionRepository::new(Arc::clone(&self.backend)).list().await?;
        if regions.is_empty() {
            println!("No regions defined");
        }
        for region in &regions {
            println!("{}", describe(region));
        }
        Ok(true)
    }

    async fn show_region(&self, id: &RegionId) -> AppResult<bool> {
        let region = RegionRepository::new(Arc::clone(&self.backend)).get(id).await?;
        println!("{}", describe(&region));
        if let Some(created_at) = &region.created_at {
            println!("  created {}", created_at);
        }

        let mut previews = PreviewManager::new(Arc::clone(&self.backend));
        match previews.request(PreviewTarget::Stored(region.id.clone())).await {
            Some(handle) => {
                let path = self.viewer.show(handle, &format!("region-{}", region.id))?;
                println!("  preview {}", path.display());
            }
            None => println!("  No preview available"),
        }
        Ok(true)
    }

    async fn delete_region(&self, id: &RegionId, assume_yes: bool) -> AppResult<bool> {
        let repository = RegionRepository::new(Arc::clone(&self.backend));
        let region = repository.get(id).await?;

        if !assume_yes {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            prompt(&format!("Delete region '{}' ({})? [y/N] ", region.name, region.id)).await?;
            let answer = lines.next_line().await?.unwrap_or_default();
            if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                println!("Not deleted");
                return Ok(true);
            }
        }

        repository.delete(id).await?;
        println!("Deleted region '{}'", region.name);
        Ok(true)
    }

    async fn shoot(&self, id: &RegionId) -> AppResult<bool> {
        let result = ScreenshotOrchestrator::new(Arc::clone(&self.backend))
            .capture_one(id)
            .await;

        if result.success {
            match &result.file_path {
                Some(path) => println!("Screenshot saved to {}", path),
                None => println!("Screenshot saved"),
            }
        } else {
            eprintln!(
                "Screenshot failed: {}",
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(result.success)
    }

    async fn shoot_all(&self) -> AppResult<bool> {
        let regions = RegionRepository::new(Arc::clone(&self.backend)).list().await?;
        let summary = ScreenshotOrchestrator::new(Arc::clone(&self.backend))
            .capture_all(&regions)
            .await?;

        println!("{}", summary);
        if let BatchStatus::PartialSuccess { .. } = summary.status() {
            for failure in summary.failures() {
                let region = failure
                    .region_id
                    .as_ref()
                    .and_then(|id| regions.iter().find(|r| &r.id == id))
                    .map(|r| r.name.as_str())
                    .unwrap_or("unknown region");
                eprintln!(
                    "  {}: {}",
                    region,
                    failure.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
        // Partial success is a warning, not a failed command.
        Ok(true)
    }

    async fn show_config(&self) -> AppResult<bool> {
        let config = ConfigRepository::new(Arc::clone(&self.backend)).get().await?;
        println!("output_dir          = {}", config.output_dir);
        println!("hotkey_a            = {}", config.hotkey_a);
        println!("hotkey_b            = {}", config.hotkey_b);
        println!("hotkey_c            = {}", config.hotkey_c);
        if config.timer_enabled() {
            println!("screenshot_interval = {}s", config.screenshot_interval);
        } else {
            println!("screenshot_interval = 0 (timer disabled)");
        }
        Ok(true)
    }

    async fn set_config(&self, changes: &[ConfigChange]) -> AppResult<bool> {
        let repository = ConfigRepository::new(Arc::clone(&self.backend));
        let mut config = repository.get().await?;
        for change in changes {
            change.apply(&mut config);
        }
        repository.update(&config).await?;
        println!("Configuration saved");
        Ok(true)
    }

    /// Drive one draft from stdin until it is saved or cancelled.
    ///
    /// Capture events and typed lines are handled as they arrive, so corners
    /// show up while the user can still type `done` or `cancel`.
    async fn run_draft(&self, mut machine: RegionDraftMachine<B>) -> AppResult<bool> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut shown_preview = None;
        let mut events_open = false;

        match &machine.draft().id {
            Some(id) => println!("Editing region {} ('{}')", id, machine.draft().name),
            None => println!("New region. Set a name, then type 'capture' or set coordinates."),
        }
        println!("{}", DRAFT_HELP);

        while !machine.step().is_terminal() {
            print_draft(&machine);
            prompt("> ").await?;

            let capturing = machine.step() == DraftStep::Capturing && events_open;

            tokio::select! {
                event = machine.next_capture_event(), if capturing => match event {
                    Some(event) => {
                        report_event(&event);
                        if matches!(event, CaptureEvent::Completed { .. }) && machine.preview().is_none() {
                            println!("No preview available");
                        }
                    }
                    None => {
                        events_open = false;
                        println!("Capture stopped. Type 'done' or 'cancel'.");
                    }
                },
                line = lines.next_line() => match line? {
                    Some(line) => {
                        self.handle_input(&mut machine, &line, &mut events_open).await;
                    }
                    None => {
                        debug!("Input closed, discarding draft");
                        if let Err(e) = machine.cancel() {
                            warn!(error = ?e, "Failed to cancel draft on input close");
                        }
                    }
                },
            }

            self.show_new_preview(&machine, &mut shown_preview)?;
        }

        info!(step = ?machine.step(), "Draft session finished");
        Ok(true)
    }

    async fn handle_input(
        &self,
        machine: &mut RegionDraftMachine<B>,
        line: &str,
        events_open: &mut bool,
    ) {
        let input = match DraftInput::parse(line) {
            Ok(input) => input,
            Err(message) => {
                println!("{}", message);
                return;
            }
        };

        let outcome = match input {
            DraftInput::Set { field, value } => machine.edit_field(field, &value).await,
            DraftInput::Capture => match machine.start_capture().await {
                Ok(token) => {
                    *events_open = true;
                    debug!(session = %token, "Capture started from input");
                    self.print_capture_hint().await;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            DraftInput::Done => machine.finish_capture().await.map(|()| {
                *events_open = false;
                for corner in machine.missing_corners() {
                    println!("The {} corner was never captured; set it before saving.", corner);
                }
                if machine.preview().is_none() {
                    println!("No preview available");
                }
            }),
            DraftInput::Preview => match machine.load_preview().await {
                Ok(Some(_)) => Ok(()),
                Ok(None) => {
                    println!("No preview available");
                    Ok(())
                }
                Err(e) => Err(e),
            },
            DraftInput::Back => machine.back_to_form(),
            DraftInput::Save => machine.save().await.map(|region| {
                println!("Saved region '{}' ({})", region.name, region.id);
            }),
            DraftInput::Cancel if machine.step() == DraftStep::Capturing => {
                machine.cancel_capture().await.map(|cancelled| {
                    *events_open = false;
                    println!("Capture cancelled");
                    if let Some(failure) = cancelled.poll_failure {
                        println!("Could not read captured coordinates: {}", failure);
                    }
                })
            }
            DraftInput::Cancel => machine.cancel().map(|()| println!("Draft discarded")),
            DraftInput::Help => {
                println!("{}", DRAFT_HELP);
                Ok(())
            }
            DraftInput::Empty => Ok(()),
        };

        if let Err(e) = outcome {
            debug!(error = ?e, "Draft input rejected");
            println!("Error: {}", e.user_message());
        }
    }

    async fn print_capture_hint(&self) {
        match ConfigRepository::new(Arc::clone(&self.backend)).get().await {
            Ok(config) => println!(
                "Capturing. Press {} at the top-left corner and {} at the bottom-right corner.",
                config.hotkey_a, config.hotkey_b
            ),
            Err(e) => {
                debug!(error = ?e, "Could not read hotkeys for capture hint");
                println!("Capturing. Press the corner hotkeys.");
            }
        }
    }

    fn show_new_preview(
        &self,
        machine: &RegionDraftMachine<B>,
        shown: &mut Option<u64>,
    ) -> AppResult<()> {
        let Some(handle) = machine.preview() else {
            return Ok(());
        };
        if *shown == Some(handle.serial()) {
            return Ok(());
        }
        let path = self.viewer.show(handle, "draft-preview")?;
        println!("Preview {}x{} written to {}", handle.width(), handle.height(), path.display());
        *shown = Some(handle.serial());
        Ok(())
    }
}

fn describe(region: &Region) -> String {
    format!(
        "{:<12} {:<20} ({}, {}) - ({}, {})  {}x{}",
        region.id,
        region.name,
        region.x1,
        region.y1,
        region.x2,
        region.y2,
        region.width(),
        region.height()
    )
}

fn print_draft<B: CaptureBackend>(machine: &RegionDraftMachine<B>) {
    let draft = machine.draft();
    println!(
        "[{:?}] name='{}' x1={} y1={} x2={} y2={}",
        machine.step(),
        draft.name,
        draft.x1,
        draft.y1,
        draft.x2,
        draft.y2
    );
}

fn report_event(event: &CaptureEvent) {
    match event {
        CaptureEvent::Connected => debug!("Capture connected"),
        CaptureEvent::PollFailed { reason } => println!("Waiting for backend: {}", reason),
        CaptureEvent::CornerCaptured { corner, point } => {
            println!("Captured {} corner at ({}, {})", corner, point.x, point.y)
        }
        CaptureEvent::Completed { .. } => println!("Both corners captured"),
    }
}

async fn prompt(text: &str) -> AppResult<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}
