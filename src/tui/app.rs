use flownet::{FlowOutcome, MaxFlow, Network};

pub enum SortMode {
    Name,
    Capacity,
}

pub struct App {
    pub running: bool,
    pub sort_mode: SortMode,
    title: String,
    network: Network<String>,
    outcome: Result<FlowOutcome<String>, String>,
}

impl App {
    pub fn new(title: String, network: Network<String>) -> Self {
        let outcome = MaxFlow::new(&network)
            .solve()
            .map_err(|err| err.to_string());
        Self {
            running: true,
            sort_mode: SortMode::Name,
            title,
            network,
            outcome,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn network(&self) -> &Network<String> {
        &self.network
    }

    pub fn outcome(&self) -> Result<&FlowOutcome<String>, &str> {
        self.outcome.as_ref().map_err(|err| err.as_str())
    }

    pub fn toggle_sort(&mut self) {
        self.sort_mode = match self.sort_mode {
            SortMode::Name => SortMode::Capacity,
            SortMode::Capacity => SortMode::Name,
        };
    }
}

impl Drop for App {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
