use arboard::Clipboard;
use color_eyre::Result;
use ratatui::widgets::ListState;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    config::{self, AppSettings},
    domain::{
        BlockInfo, Cluster, ClusterStatus, SearchResult, Transaction, ValidatorDetails,
    },
    event::Action,
    network::NetworkManager,
    search::{SearchFilter, SearchQuery, needs_validator_augmentation},
};

/// Focus area in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Blocks,
    Transactions,
}

/// State for the Search Results popup.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultsState {
    pub results: Vec<SearchResult>,
    pub selected_index: usize,
}

impl SearchResultsState {
    fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            selected_index: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn len(&self) -> usize {
        self.results.len()
    }

    fn select_next(&mut self) {
        if !self.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.len();
        }
    }

    fn select_prev(&mut self) {
        if !self.is_empty() {
            self.selected_index = if self.selected_index == 0 {
                self.len() - 1
            } else {
                self.selected_index - 1
            };
        }
    }

    pub fn get_selected_item(&self) -> Option<&SearchResult> {
        self.results.get(self.selected_index)
    }
}

/// State for popups
#[derive(Debug, Clone, PartialEq)]
pub enum PopupState {
    None,
    ClusterSelect {
        available_clusters: Vec<Cluster>,
        selected_index: usize,
    },
    Search {
        query: String,
        filter: SearchFilter,
    },
    Message(String),
    SearchResults(SearchResultsState),
    Help,
}

/// Loading state of the validator augmentation for the account detail
/// view. Keyed by address so a response for a previously viewed account
/// cannot attach to the current one.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorPanel {
    Loading,
    Loaded(ValidatorDetails),
    Failed(String),
}

/// The main application struct holding the state.
pub struct App {
    pub settings: AppSettings,

    pub focus: Focus,
    pub show_live: Arc<Mutex<bool>>,
    pub exit: bool,
    pub terminal_size: (u16, u16),

    pub blocks: Arc<Mutex<Vec<BlockInfo>>>,
    pub transactions: Arc<Mutex<Vec<Transaction>>>,
    pub current_slot: u64,

    pub block_list_state: ListState,
    pub transaction_list_state: ListState,

    pub show_block_details: bool,
    pub show_transaction_details: bool,
    pub popup_state: PopupState,

    pub viewing_search_result_details: bool,
    pub detailed_search_result: Option<SearchResult>,
    /// Augmentation state for the currently viewed vote account.
    pub validator_panel: Option<(String, ValidatorPanel)>,

    /// Sequence number of the most recently dispatched search.
    last_search_seq: u64,

    clipboard: Option<Clipboard>,
}

impl App {
    /// Creates a new App instance. A cluster passed on the command line
    /// overrides the persisted selection for this run.
    pub fn new(cluster_override: Option<Cluster>) -> Self {
        let mut settings = config::load_settings();
        if let Some(cluster) = cluster_override {
            settings.selected_cluster = cluster;
        }

        let show_live = Arc::new(Mutex::new(true));
        let blocks = Arc::new(Mutex::new(Vec::new()));
        let transactions = Arc::new(Mutex::new(Vec::new()));

        // Clipboard init can fail in headless environments; degrade quietly
        let clipboard = Clipboard::new().ok();

        Self {
            settings,
            show_live,
            blocks,
            transactions,
            current_slot: 0,
            focus: Focus::Blocks,
            exit: false,
            terminal_size: (0, 0),
            block_list_state: ListState::default(),
            transaction_list_state: ListState::default(),
            show_block_details: false,
            show_transaction_details: false,
            popup_state: PopupState::None,
            viewing_search_result_details: false,
            detailed_search_result: None,
            validator_panel: None,
            last_search_seq: 0,
            clipboard,
        }
    }

    /// Updates the application state based on the received action.
    pub fn update(&mut self, action: Action, network_manager: &NetworkManager) -> Result<()> {
        // Store selected ids before data updates shift indices
        let mut selected_block_slot: Option<u64> = None;
        if let Some(index) = self.block_list_state.selected()
            && let Ok(blocks) = self.blocks.try_lock()
        {
            selected_block_slot = blocks.get(index).map(|b| b.slot);
        }
        let mut selected_txn_sig: Option<String> = None;
        if !self.viewing_search_result_details
            && let Some(index) = self.transaction_list_state.selected()
            && let Ok(transactions) = self.transactions.try_lock()
        {
            selected_txn_sig = transactions.get(index).map(|t| t.signature().to_string());
        }

        match action {
            // App Lifecycle & Control
            Action::Quit => self.exit = true,
            Action::ToggleLiveUpdates => self.handle_toggle_live_updates(network_manager),
            Action::RefreshData => self.handle_refresh_data(network_manager),
            Action::CloseDetailsOrPopup => self.handle_close_details_or_popup(),
            Action::ClearPopup => self.popup_state = PopupState::None,

            // Focus & Selection
            Action::SwitchFocus => self.handle_switch_focus(),
            Action::MoveSelectionUp | Action::HandleScrollUp => self.move_selection(-1),
            Action::MoveSelectionDown | Action::HandleScrollDown => self.move_selection(1),
            Action::ScrollPageUp => self.move_selection_page(-1),
            Action::ScrollPageDown => self.move_selection_page(1),
            Action::ShowDetails => self.show_details(),

            // Cluster Selection Popup
            Action::OpenClusterSelector => self.handle_open_cluster_selector(),
            Action::SelectClusterOption(idx) => self.handle_select_cluster_option(idx),
            Action::SwitchToCluster(cluster) => self.switch_cluster(cluster, network_manager),

            // Search Popup & Results
            Action::OpenSearchPopup => self.handle_open_search_popup(),
            Action::SearchInput(c) => self.handle_search_input(c),
            Action::SearchBackspace => self.handle_search_backspace(),
            Action::SearchSwitchFilter => self.handle_search_switch_filter(),
            Action::PerformSearch(query) => self.handle_perform_search(query, network_manager),
            Action::SearchResultSelectNext => self.handle_search_result_select_next(),
            Action::SearchResultSelectPrev => self.handle_search_result_select_prev(),
            Action::SearchResultShowSelected => {
                self.handle_search_result_show_selected(network_manager);
            }

            // Help & Utilities
            Action::OpenHelpPopup => self.popup_state = PopupState::Help,
            Action::CopySelectedId => self.copy_selected_id_to_clipboard(),
            Action::OpenInWebExplorer => self.open_in_web_explorer(),
            Action::ShowMessage(msg) => self.show_message(msg),

            // Network Update Handling (from NetworkManager)
            Action::UpdateClusterStatus(res) => self.handle_cluster_status_update(res),
            Action::UpdateBlocks(blocks_result) => {
                self.handle_blocks_update(blocks_result, selected_block_slot);
            }
            Action::UpdateTransactions(txns_result) => {
                self.handle_transactions_update(txns_result, selected_txn_sig);
            }
            Action::UpdateSearchResults { seq, outcome } => {
                self.handle_search_results_update(seq, outcome);
            }
            Action::UpdateValidatorDetails { address, outcome } => {
                self.handle_validator_details_update(address, outcome);
            }
        }
        Ok(())
    }

    // --- Private Helper Methods for Actions ---

    fn handle_toggle_live_updates(&mut self, network_manager: &NetworkManager) {
        let new_state = match self.show_live.try_lock() {
            Ok(show) => !*show,
            Err(_) => return,
        };

        if let Ok(mut show) = self.show_live.try_lock() {
            *show = new_state;
        } else {
            return;
        }

        if new_state {
            network_manager.fetch_initial_data();
            self.popup_state = PopupState::None;
        } else {
            self.show_message("Live updates paused.".to_string());
        }
    }

    fn handle_refresh_data(&mut self, network_manager: &NetworkManager) {
        network_manager.fetch_initial_data();
        self.show_message("Refreshing data...".to_string());
    }

    fn handle_close_details_or_popup(&mut self) {
        if self.show_block_details || self.show_transaction_details
            || self.viewing_search_result_details
        {
            self.show_block_details = false;
            self.show_transaction_details = false;
            self.viewing_search_result_details = false;
            self.detailed_search_result = None;
            self.validator_panel = None;
        } else {
            self.popup_state = PopupState::None;
        }
    }

    fn handle_switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Blocks => Focus::Transactions,
            Focus::Transactions => Focus::Blocks,
        };
    }

    // --- Cluster Selection Popup Handlers ---

    fn handle_open_cluster_selector(&mut self) {
        let available_clusters = config::get_available_clusters(&self.settings);
        let current_index = available_clusters
            .iter()
            .position(|c| *c == self.settings.selected_cluster)
            .unwrap_or(0);
        self.popup_state = PopupState::ClusterSelect {
            available_clusters,
            selected_index: current_index,
        };
    }

    fn handle_select_cluster_option(&mut self, target_index: usize) {
        if let PopupState::ClusterSelect {
            available_clusters,
            selected_index,
        } = &mut self.popup_state
        {
            let num_options = available_clusters.len();
            *selected_index = if target_index >= num_options {
                0
            } else {
                target_index
            };
        }
    }

    /// Switches the active cluster.
    fn switch_cluster(&mut self, cluster: Cluster, network_manager: &NetworkManager) {
        self.show_message(format!("Switching to {}...", cluster.as_str()));

        if let Err(e) = config::set_selected_cluster(&mut self.settings, cluster.clone()) {
            self.popup_state = PopupState::Message(format!("Failed to save cluster setting: {}", e));
            return;
        }

        if let Ok(mut blocks) = self.blocks.try_lock() {
            blocks.clear();
        }
        if let Ok(mut transactions) = self.transactions.try_lock() {
            transactions.clear();
        }

        self.block_list_state.select(None);
        self.transaction_list_state.select(None);
        self.show_block_details = false;
        self.show_transaction_details = false;
        self.viewing_search_result_details = false;
        self.detailed_search_result = None;
        self.validator_panel = None;
        self.current_slot = 0;
        if matches!(self.popup_state, PopupState::SearchResults { .. }) {
            self.popup_state = PopupState::None;
        }

        let switch_future = network_manager.switch_cluster(cluster);
        network_manager.spawn_task(switch_future);
    }

    // --- Search Popup & Results Handlers ---

    fn handle_open_search_popup(&mut self) {
        self.popup_state = PopupState::Search {
            query: String::new(),
            filter: SearchFilter::All,
        };
    }

    fn handle_search_input(&mut self, c: char) {
        if let PopupState::Search { query, .. } = &mut self.popup_state {
            query.push(c);
        }
    }

    fn handle_search_backspace(&mut self) {
        if let PopupState::Search { query, .. } = &mut self.popup_state {
            query.pop();
        }
    }

    fn handle_search_switch_filter(&mut self) {
        if let PopupState::Search { filter, .. } = &mut self.popup_state {
            *filter = filter.next();
        }
    }

    fn handle_perform_search(&mut self, query: SearchQuery, network_manager: &NetworkManager) {
        if query.text.is_empty() {
            self.show_message("Please enter a search term".to_string());
            return;
        }
        self.show_message(format!("Searching ({})...", query.filters.types.as_str()));
        // Remember the stamp; only results carrying it may apply
        self.last_search_seq = network_manager.search(query);
    }

    fn handle_search_result_select_next(&mut self) {
        if let PopupState::SearchResults(state) = &mut self.popup_state {
            state.select_next();
        }
    }

    fn handle_search_result_select_prev(&mut self) {
        if let PopupState::SearchResults(state) = &mut self.popup_state {
            state.select_prev();
        }
    }

    fn handle_search_result_show_selected(&mut self, network_manager: &NetworkManager) {
        let PopupState::SearchResults(state) = &self.popup_state else {
            return;
        };
        let Some(item) = state.get_selected_item().cloned() else {
            return;
        };

        self.block_list_state.select(None);
        self.transaction_list_state.select(None);
        self.viewing_search_result_details = true;
        self.show_transaction_details = matches!(item, SearchResult::Transaction(_));
        self.show_block_details = false;
        self.popup_state = PopupState::None;
        self.validator_panel = None;

        // Vote accounts get a second-stage fetch; it never blocks the
        // base account render
        if needs_validator_augmentation(&item) {
            let address = item.id().to_string();
            self.validator_panel = Some((address.clone(), ValidatorPanel::Loading));
            network_manager.fetch_validator_details(address);
        }

        self.detailed_search_result = Some(item);
    }

    // --- Network Update Handlers ---

    fn handle_cluster_status_update(&mut self, status_result: Result<ClusterStatus, String>) {
        match status_result {
            Ok(status) => {
                self.current_slot = status.slot;
                if matches!(self.popup_state, PopupState::Message(_)) {
                    self.popup_state = PopupState::None;
                }
                if let Ok(mut live) = self.show_live.try_lock() {
                    *live = true;
                }
            }
            Err(e) => {
                self.show_error_message(e);
                if let Ok(mut live) = self.show_live.try_lock() {
                    *live = false;
                }
            }
        }
    }

    fn handle_blocks_update(
        &mut self,
        blocks_result: Result<Vec<BlockInfo>, String>,
        prev_selected_slot: Option<u64>,
    ) {
        if let Err(e) = blocks_result {
            self.show_error_message(format!("Failed to update blocks: {}", e));
            return;
        }
        self.sync_block_selection(prev_selected_slot);
    }

    fn handle_transactions_update(
        &mut self,
        txns_result: Result<Vec<Transaction>, String>,
        prev_selected_sig: Option<String>,
    ) {
        if let Err(e) = txns_result {
            self.show_error_message(format!("Failed to update transactions: {}", e));
            return;
        }
        self.sync_transaction_selection(prev_selected_sig);
    }

    fn handle_search_results_update(
        &mut self,
        seq: u64,
        outcome: Result<Vec<SearchResult>, String>,
    ) {
        // Last writer wins: a slow response from a superseded search must
        // not overwrite state the newer search owns
        if seq != self.last_search_seq {
            tracing::debug!(
                "discarding stale search response (seq {seq}, current {})",
                self.last_search_seq
            );
            return;
        }

        match outcome {
            Ok(items) => {
                if items.is_empty() {
                    self.show_message("No results found.".to_string());
                } else {
                    self.popup_state = PopupState::SearchResults(SearchResultsState::new(items));
                }
            }
            Err(e) => {
                self.show_error_message(format!("Search failed: {}", e));
            }
        }
    }

    fn handle_validator_details_update(
        &mut self,
        address: String,
        outcome: Result<ValidatorDetails, String>,
    ) {
        // Apply only if the user is still viewing that account
        let Some((current_address, panel)) = &mut self.validator_panel else {
            return;
        };
        if *current_address != address {
            return;
        }

        *panel = match outcome {
            Ok(details) => ValidatorPanel::Loaded(details),
            Err(e) => ValidatorPanel::Failed(e),
        };
    }

    // --- Utility Helpers ---

    /// Sets the popup state to show a message.
    fn show_message(&mut self, msg: String) {
        self.popup_state = if msg.is_empty() {
            PopupState::None
        } else {
            PopupState::Message(msg)
        };
    }

    /// Sets the popup state to show an error message.
    fn show_error_message(&mut self, error_msg: String) {
        self.popup_state = PopupState::Message(format!("Error: {}", error_msg));
    }

    // --- Sync Selection After Data Update ---

    fn sync_block_selection(&mut self, prev_selected_slot: Option<u64>) {
        if let Ok(blocks) = self.blocks.try_lock() {
            let new_index =
                prev_selected_slot.and_then(|slot| blocks.iter().position(|b| b.slot == slot));
            self.block_list_state.select(new_index);

            if new_index.is_none() && !blocks.is_empty() {
                self.block_list_state.select(Some(0));
            } else if blocks.is_empty() {
                self.block_list_state.select(None);
            }
        }
    }

    fn sync_transaction_selection(&mut self, prev_selected_sig: Option<String>) {
        if let Ok(transactions) = self.transactions.try_lock() {
            let new_index = prev_selected_sig
                .and_then(|sig| transactions.iter().position(|t| t.signature() == sig));
            self.transaction_list_state.select(new_index);

            if new_index.is_none() && !transactions.is_empty() {
                self.transaction_list_state.select(Some(0));
            } else if transactions.is_empty() {
                self.transaction_list_state.select(None);
            }
        }
    }

    // --- Scrolling & Selection ---

    fn focused_list_len(&self) -> usize {
        match self.focus {
            Focus::Blocks => self.blocks.try_lock().map(|b| b.len()).unwrap_or(0),
            Focus::Transactions => self.transactions.try_lock().map(|t| t.len()).unwrap_or(0),
        }
    }

    fn focused_list_state(&mut self) -> &mut ListState {
        match self.focus {
            Focus::Blocks => &mut self.block_list_state,
            Focus::Transactions => &mut self.transaction_list_state,
        }
    }

    /// Moves the focused selection by one step, wrapping at the ends.
    fn move_selection(&mut self, delta: i64) {
        let list_len = self.focused_list_len();
        if list_len == 0 {
            return;
        }

        let state = self.focused_list_state();
        let current = state.selected().unwrap_or(0) as i64;
        let new_index = (current + delta).rem_euclid(list_len as i64) as usize;
        state.select(Some(new_index));
    }

    /// Moves the focused selection by one page, clamping at the ends.
    fn move_selection_page(&mut self, direction: i64) {
        let list_len = self.focused_list_len();
        if list_len == 0 {
            return;
        }

        let item_height = match self.focus {
            Focus::Blocks => crate::constants::BLOCK_ITEM_HEIGHT,
            Focus::Transactions => crate::constants::TXN_ITEM_HEIGHT,
        };
        let page_size = self.get_items_per_page(item_height) as i64;

        let state = self.focused_list_state();
        let current = state.selected().unwrap_or(0) as i64;
        let new_index = (current + direction * page_size).clamp(0, list_len as i64 - 1) as usize;
        state.select(Some(new_index));
    }

    fn get_items_per_page(&self, item_height: u16) -> usize {
        let list_height = self.get_list_pane_height();
        if list_height > 0 && item_height > 0 {
            (list_height / item_height) as usize
        } else {
            1
        }
    }

    // --- Show Details ---

    fn show_details(&mut self) {
        match self.focus {
            Focus::Blocks => {
                if self.block_list_state.selected().is_some() {
                    self.show_block_details = true;
                    self.show_transaction_details = false;
                    self.viewing_search_result_details = false;
                }
            }
            Focus::Transactions => {
                if self.transaction_list_state.selected().is_some() {
                    self.show_transaction_details = true;
                    self.show_block_details = false;
                    self.viewing_search_result_details = false;
                }
            }
        }
    }

    /// The id (signature, address, or slot) of whatever is selected or
    /// being viewed.
    fn selected_id(&self) -> Option<String> {
        if let Some(result) = &self.detailed_search_result
            && self.viewing_search_result_details
        {
            return Some(result.id().to_string());
        }

        match self.focus {
            Focus::Transactions => {
                let index = self.transaction_list_state.selected()?;
                self.transactions
                    .try_lock()
                    .ok()?
                    .get(index)
                    .map(|t| t.signature().to_string())
            }
            Focus::Blocks => {
                let index = self.block_list_state.selected()?;
                self.blocks
                    .try_lock()
                    .ok()?
                    .get(index)
                    .map(|b| b.slot.to_string())
            }
        }
    }

    /// Copies the selected id to the clipboard.
    fn copy_selected_id_to_clipboard(&mut self) {
        let Some(id) = self.selected_id() else {
            self.show_message("No item selected to copy.".to_string());
            return;
        };

        if let Some(clipboard) = self.clipboard.as_mut() {
            match clipboard.set_text(id.clone()) {
                Ok(_) => self.show_message(format!("Copied: {}", id)),
                Err(e) => self.show_error_message(format!("Clipboard Error: {}", e)),
            }
        } else {
            self.show_error_message("Clipboard not available".to_string());
        }
    }

    /// Opens the selected entity on the public web explorer.
    fn open_in_web_explorer(&mut self) {
        let Some(id) = self.selected_id() else {
            self.show_message("No item selected to open.".to_string());
            return;
        };

        let kind = if self.viewing_search_result_details {
            match self.detailed_search_result {
                Some(SearchResult::Transaction(_)) => "tx",
                _ => "address",
            }
        } else {
            match self.focus {
                Focus::Transactions => "tx",
                Focus::Blocks => "block",
            }
        };

        let Some(url) = self.settings.selected_cluster.web_explorer_url(kind, &id) else {
            self.show_message("No web explorer for this cluster.".to_string());
            return;
        };

        match open::that(&url) {
            Ok(_) => self.show_message(format!("Opened: {}", url)),
            Err(e) => self.show_error_message(format!("Failed to open browser: {}", e)),
        }
    }

    /// Updates the stored terminal size.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    fn get_list_pane_height(&self) -> u16 {
        self.terminal_size
            .1
            .saturating_sub(crate::constants::HEADER_HEIGHT)
            .saturating_sub(crate::constants::FOOTER_HEIGHT)
            .saturating_sub(crate::constants::TITLE_HEIGHT)
            .saturating_sub(2)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ChainClient, GraphQlClient};
    use crate::search::{SearchEngine, SearchFilters};
    use crate::test_utils::DomainMother;
    use tokio::sync::mpsc;

    /// Builds an App plus a NetworkManager wired to throwaway channels.
    /// Network calls the manager spawns will fail against the local
    /// endpoints; the tests only exercise state transitions.
    fn test_fixture() -> (App, NetworkManager, tokio::runtime::Runtime) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let app = App::new(Some(Cluster::Localnet));

        let chain = ChainClient::new(&Cluster::Localnet).unwrap();
        let engine = SearchEngine::new(GraphQlClient::new("http://localhost:8890").unwrap());
        let (sender, _receiver) = mpsc::channel(16);

        let manager = NetworkManager::new(
            Arc::new(Mutex::new(chain)),
            Arc::new(Mutex::new(engine)),
            Arc::clone(&app.show_live),
            Arc::clone(&app.blocks),
            Arc::clone(&app.transactions),
            runtime.handle().clone(),
            sender,
        );

        (app, manager, runtime)
    }

    fn sample_results() -> Vec<SearchResult> {
        vec![SearchResult::Transaction(Box::new(
            DomainMother::transaction("5sigA"),
        ))]
    }

    #[test]
    fn test_search_results_apply_for_current_seq() {
        let (mut app, manager, _rt) = test_fixture();

        let query = SearchQuery::new("a".repeat(88), SearchFilters::default());
        app.update(Action::PerformSearch(query), &manager).unwrap();

        app.update(
            Action::UpdateSearchResults {
                seq: 1,
                outcome: Ok(sample_results()),
            },
            &manager,
        )
        .unwrap();

        assert!(matches!(app.popup_state, PopupState::SearchResults(_)));
    }

    #[test]
    fn test_stale_search_results_are_discarded() {
        let (mut app, manager, _rt) = test_fixture();

        // Two searches: seq 1 then seq 2; only seq 2 may apply
        let query = SearchQuery::new("a".repeat(88), SearchFilters::default());
        app.update(Action::PerformSearch(query.clone()), &manager)
            .unwrap();
        app.update(Action::PerformSearch(query), &manager).unwrap();

        // The stale (seq 1) response arrives late and must be ignored
        app.update(
            Action::UpdateSearchResults {
                seq: 1,
                outcome: Ok(sample_results()),
            },
            &manager,
        )
        .unwrap();
        assert!(
            !matches!(app.popup_state, PopupState::SearchResults(_)),
            "stale response must not open the results popup"
        );

        // The current (seq 2) response applies normally
        app.update(
            Action::UpdateSearchResults {
                seq: 2,
                outcome: Ok(sample_results()),
            },
            &manager,
        )
        .unwrap();
        assert!(matches!(app.popup_state, PopupState::SearchResults(_)));
    }

    #[test]
    fn test_empty_search_results_show_message_not_error() {
        let (mut app, manager, _rt) = test_fixture();

        let query = SearchQuery::new("a".repeat(88), SearchFilters::default());
        app.update(Action::PerformSearch(query), &manager).unwrap();
        app.update(
            Action::UpdateSearchResults {
                seq: 1,
                outcome: Ok(Vec::new()),
            },
            &manager,
        )
        .unwrap();

        assert_eq!(
            app.popup_state,
            PopupState::Message("No results found.".to_string())
        );
    }

    #[test]
    fn test_empty_query_is_rejected_locally() {
        let (mut app, manager, _rt) = test_fixture();

        let query = SearchQuery::new("   ", SearchFilters::default());
        app.update(Action::PerformSearch(query), &manager).unwrap();

        assert_eq!(
            app.popup_state,
            PopupState::Message("Please enter a search term".to_string())
        );
    }

    #[test]
    fn test_vote_account_selection_starts_augmentation() {
        let (mut app, manager, _rt) = test_fixture();

        let account = crate::domain::AccountSummary::from_json(
            &crate::test_utils::JsonMother::vote_account(),
        )
        .unwrap();
        let address = account.address.clone();
        app.popup_state = PopupState::SearchResults(SearchResultsState::new(vec![
            SearchResult::Account(account),
        ]));

        app.update(Action::SearchResultShowSelected, &manager)
            .unwrap();

        assert!(app.viewing_search_result_details);
        let (panel_address, panel) = app.validator_panel.as_ref().unwrap();
        assert_eq!(*panel_address, address);
        assert_eq!(*panel, ValidatorPanel::Loading);
    }

    #[test]
    fn test_validator_failure_degrades_without_dropping_account() {
        let (mut app, manager, _rt) = test_fixture();

        let account = crate::domain::AccountSummary::from_json(
            &crate::test_utils::JsonMother::vote_account(),
        )
        .unwrap();
        let address = account.address.clone();
        app.popup_state = PopupState::SearchResults(SearchResultsState::new(vec![
            SearchResult::Account(account),
        ]));
        app.update(Action::SearchResultShowSelected, &manager)
            .unwrap();

        app.update(
            Action::UpdateValidatorDetails {
                address: address.clone(),
                outcome: Err("timeout".to_string()),
            },
            &manager,
        )
        .unwrap();

        // Base account data survives; only the panel degrades
        assert!(app.detailed_search_result.is_some());
        let (_, panel) = app.validator_panel.as_ref().unwrap();
        assert_eq!(*panel, ValidatorPanel::Failed("timeout".to_string()));
    }

    #[test]
    fn test_validator_details_for_other_address_are_ignored() {
        let (mut app, manager, _rt) = test_fixture();

        let account = crate::domain::AccountSummary::from_json(
            &crate::test_utils::JsonMother::vote_account(),
        )
        .unwrap();
        app.popup_state = PopupState::SearchResults(SearchResultsState::new(vec![
            SearchResult::Account(account),
        ]));
        app.update(Action::SearchResultShowSelected, &manager)
            .unwrap();

        app.update(
            Action::UpdateValidatorDetails {
                address: "someOtherAddress".to_string(),
                outcome: Err("late response".to_string()),
            },
            &manager,
        )
        .unwrap();

        let (_, panel) = app.validator_panel.as_ref().unwrap();
        assert_eq!(*panel, ValidatorPanel::Loading);
    }

    #[test]
    fn test_cluster_status_updates_slot() {
        let (mut app, manager, _rt) = test_fixture();

        app.update(
            Action::UpdateClusterStatus(Ok(ClusterStatus { slot: 250_000_000 })),
            &manager,
        )
        .unwrap();

        assert_eq!(app.current_slot, 250_000_000);
    }

    #[test]
    fn test_selection_wraps_around() {
        let (mut app, manager, _rt) = test_fixture();

        {
            let mut blocks = app.blocks.try_lock().unwrap();
            blocks.push(DomainMother::block(3));
            blocks.push(DomainMother::block(2));
            blocks.push(DomainMother::block(1));
        }
        app.block_list_state.select(Some(0));

        app.update(Action::MoveSelectionUp, &manager).unwrap();
        assert_eq!(app.block_list_state.selected(), Some(2));

        app.update(Action::MoveSelectionDown, &manager).unwrap();
        assert_eq!(app.block_list_state.selected(), Some(0));
    }

    #[test]
    fn test_search_popup_filter_cycles() {
        let (mut app, manager, _rt) = test_fixture();

        app.update(Action::OpenSearchPopup, &manager).unwrap();
        app.update(Action::SearchSwitchFilter, &manager).unwrap();

        match &app.popup_state {
            PopupState::Search { filter, .. } => {
                assert_eq!(*filter, SearchFilter::Transaction);
            }
            other => panic!("expected search popup, got {:?}", other),
        }
    }
}
