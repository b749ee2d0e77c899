use crate::domain::{BlockInfo, Cluster, ClusterStatus, SearchResult, Transaction, ValidatorDetails};
use crate::search::SearchQuery;

/// Events related to network operations and data fetching.
#[derive(Debug)]
pub enum NetworkUpdateEvent {
    StatusUpdate(Result<ClusterStatus, String>),
    BlocksFetched(Result<Vec<BlockInfo>, String>),
    TransactionsFetched(Result<Vec<Transaction>, String>),
    /// Search outcome, stamped with the sequence number assigned at
    /// dispatch time so stale responses can be discarded.
    SearchResults {
        seq: u64,
        outcome: Result<Vec<SearchResult>, String>,
    },
    /// Validator augmentation outcome for the account detail view.
    ValidatorDetailsFetched {
        address: String,
        outcome: Result<ValidatorDetails, String>,
    },
}

/// Application actions triggered by user input or network events.
#[derive(Debug)]
pub enum Action {
    Quit,
    ToggleLiveUpdates,
    RefreshData,
    SwitchFocus,
    MoveSelectionUp,
    MoveSelectionDown,
    ShowDetails,
    CloseDetailsOrPopup,
    OpenClusterSelector,
    SelectClusterOption(usize),
    SwitchToCluster(Cluster),
    OpenSearchPopup,
    SearchInput(char),
    SearchBackspace,
    SearchSwitchFilter,
    PerformSearch(SearchQuery),
    SearchResultSelectNext,
    SearchResultSelectPrev,
    SearchResultShowSelected,
    OpenHelpPopup,
    CopySelectedId,
    OpenInWebExplorer,
    HandleScrollUp,
    HandleScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ShowMessage(String),
    ClearPopup,

    UpdateClusterStatus(Result<ClusterStatus, String>),
    UpdateBlocks(Result<Vec<BlockInfo>, String>),
    UpdateTransactions(Result<Vec<Transaction>, String>),
    UpdateSearchResults {
        seq: u64,
        outcome: Result<Vec<SearchResult>, String>,
    },
    UpdateValidatorDetails {
        address: String,
        outcome: Result<ValidatorDetails, String>,
    },
}
