//! Application controller
//!
//! One task owns `AppState` and processes events one at a time. Network
//! work (search, nearby fetch, dataset loads) runs in spawned tasks that
//! post their result back as another event. Nothing is cancelled: whichever
//! response arrives last overwrites the slot it targets.

pub mod deps;
pub mod state;

use crate::error::{Error, Result};
use crate::geo::{KeywordSearch, PlaceCandidate};
use crate::render::{AnnotationRenderer, MarkerHandle};
use crate::search::SearchCoordinator;
use crate::selection::{SelectedLocation, SelectionResolver};
use crate::terrain::dataset::{DatasetLoader, DatasetSource};
use crate::terrain::{self, RawHazardRecord, RawPeakRecord};
use crate::tourism::{apply_nearby, ProximityFetcher, TourismSource, TourismSpot};
use deps::{ChangeSet, Reaction, Slot};
use state::{AppState, Counters, Snapshot};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Inputs processed by the controller
pub enum Event {
    /// Search box text changed
    InputChanged(String),
    /// A search request finished
    SearchCompleted {
        request: u64,
        places: Vec<PlaceCandidate>,
    },
    /// User picked the candidate at `index` in the current list
    Select {
        index: usize,
        reply: oneshot::Sender<Option<SelectedLocation>>,
    },
    /// User picked a candidate directly
    SelectCandidate(PlaceCandidate),
    HazardsLoaded(Vec<RawHazardRecord>),
    PeaksLoaded(Vec<RawPeakRecord>),
    /// A map surface was created (or recreated)
    MapReady(Box<dyn AnnotationRenderer>),
    /// A nearby request finished
    NearbyFetched {
        request: u64,
        result: Result<Vec<TourismSpot>>,
    },
    Snapshot(oneshot::Sender<Snapshot>),
    Shutdown,
}

/// Cloneable sender side of the controller
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<Event>,
}

impl ControllerHandle {
    fn send(&self, event: Event) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| Error::Controller("Controller is not running".to_string()))
    }

    /// Report new search box text
    pub fn input(&self, text: impl Into<String>) -> Result<()> {
        self.send(Event::InputChanged(text.into()))
    }

    /// Select a candidate from the current list by position
    ///
    /// `None` means there is no candidate at `index`.
    pub async fn select(&self, index: usize) -> Result<Option<SelectedLocation>> {
        let (reply, rx) = oneshot::channel();
        self.send(Event::Select { index, reply })?;
        rx.await
            .map_err(|_| Error::Controller("Controller dropped the selection".to_string()))
    }

    /// Select a candidate that did not come from the current list
    pub fn select_candidate(&self, candidate: PlaceCandidate) -> Result<()> {
        self.send(Event::SelectCandidate(candidate))
    }

    pub fn hazards_loaded(&self, records: Vec<RawHazardRecord>) -> Result<()> {
        self.send(Event::HazardsLoaded(records))
    }

    pub fn peaks_loaded(&self, records: Vec<RawPeakRecord>) -> Result<()> {
        self.send(Event::PeaksLoaded(records))
    }

    /// Hand a new map surface to the controller
    pub fn map_ready(&self, surface: impl AnnotationRenderer + 'static) -> Result<()> {
        self.send(Event::MapReady(Box::new(surface)))
    }

    /// Current state
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Event::Snapshot(reply))?;
        rx.await
            .map_err(|_| Error::Controller("Controller dropped the snapshot".to_string()))
    }

    /// Stop the controller loop
    pub fn shutdown(&self) -> Result<()> {
        self.send(Event::Shutdown)
    }

    /// Load both datasets in the background
    ///
    /// Each dataset posts its own event when it arrives. Failures are logged
    /// and leave that dataset unloaded.
    pub fn load_datasets(
        &self,
        loader: DatasetLoader,
        hazards: DatasetSource,
        peaks: DatasetSource,
    ) {
        let handle = self.clone();
        let hazard_loader = loader.clone();
        tokio::spawn(async move {
            match hazard_loader.hazard_areas(&hazards).await {
                Ok(records) => {
                    let _ = handle.hazards_loaded(records);
                }
                Err(e) => warn!("Hazard dataset unavailable: {}", e),
            }
        });

        let handle = self.clone();
        tokio::spawn(async move {
            match loader.peaks(&peaks).await {
                Ok(records) => {
                    let _ = handle.peaks_loaded(records);
                }
                Err(e) => warn!("Peak dataset unavailable: {}", e),
            }
        });
    }
}

/// Owns the application state and runs reactions
pub struct Controller<S, T> {
    state: AppState,
    search: Arc<SearchCoordinator<S>>,
    nearby: Arc<ProximityFetcher<T>>,
    counters: Counters,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl<S, T> Controller<S, T>
where
    S: KeywordSearch + 'static,
    T: TourismSource + 'static,
{
    /// Create a controller and a handle to talk to it
    pub fn new(search: S, tourism: T) -> (Self, ControllerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ControllerHandle { tx: tx.clone() };
        let controller = Self {
            state: AppState::new(),
            search: Arc::new(SearchCoordinator::new(search)),
            nearby: Arc::new(ProximityFetcher::new(tourism)),
            counters: Counters::default(),
            tx,
            rx,
        };
        (controller, handle)
    }

    /// Run the controller on its own task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Process events until shutdown
    pub async fn run(mut self) {
        info!("Controller started");
        while let Some(event) = self.rx.recv().await {
            if !self.handle(event) {
                break;
            }
        }
        info!("Controller stopped");
    }

    /// Handle one event to completion; false means stop
    fn handle(&mut self, event: Event) -> bool {
        let mut changes = ChangeSet::new();

        match event {
            Event::InputChanged(text) => self.on_input(text, &mut changes),
            Event::SearchCompleted { request, places } => {
                debug!("Search #{} resolved with {} candidates", request, places.len());
                self.state.candidates = places;
                self.state.touch(Slot::Candidates, &mut changes);
            }
            Event::Select { index, reply } => {
                let selected = match self.state.candidates.get(index).cloned() {
                    Some(candidate) => Some(self.select(&candidate, &mut changes).0),
                    None => {
                        debug!(
                            "No candidate at index {} ({} available)",
                            index,
                            self.state.candidates.len()
                        );
                        None
                    }
                };
                let _ = reply.send(selected);
            }
            Event::SelectCandidate(candidate) => {
                self.select(&candidate, &mut changes);
            }
            Event::HazardsLoaded(records) => {
                self.state.hazards = Some(records);
                self.state.touch(Slot::HazardDataset, &mut changes);
            }
            Event::PeaksLoaded(records) => {
                self.state.peaks = Some(records);
                self.state.touch(Slot::PeakDataset, &mut changes);
            }
            Event::MapReady(surface) => {
                self.state.surface = Some(surface);
                self.state.touch(Slot::MapSurface, &mut changes);
            }
            Event::NearbyFetched { request, result } => {
                debug!("Nearby request #{} resolved", request);
                if apply_nearby(&mut self.state.spots, result) {
                    self.state.touch(Slot::TourismSpots, &mut changes);
                }
            }
            Event::Snapshot(reply) => {
                let _ = reply.send(self.state.snapshot(self.counters));
            }
            Event::Shutdown => return false,
        }

        for reaction in changes.reactions() {
            self.react(reaction);
        }
        true
    }

    fn on_input(&mut self, text: String, changes: &mut ChangeSet) {
        self.state.keyword = text.clone();
        self.state.touch(Slot::Keyword, changes);

        if SearchCoordinator::<S>::is_blank(&text) {
            self.state.candidates.clear();
            self.state.touch(Slot::Candidates, changes);
            return;
        }

        self.counters.search_requests += 1;
        let request = self.counters.search_requests;
        let search = Arc::clone(&self.search);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let places = search.search(&text).await;
            let _ = tx.send(Event::SearchCompleted { request, places });
        });
    }

    fn select(
        &mut self,
        candidate: &PlaceCandidate,
        changes: &mut ChangeSet,
    ) -> (SelectedLocation, Option<MarkerHandle>) {
        let surface: Option<&mut dyn AnnotationRenderer> = match self.state.surface.as_mut() {
            Some(surface) => Some(surface.as_mut()),
            None => None,
        };
        let result = SelectionResolver::select(&mut self.state.selected, candidate, surface);
        self.state.touch(Slot::SelectedLocation, changes);
        result
    }

    fn react(&mut self, reaction: Reaction) {
        match reaction {
            Reaction::FetchNearby => self.fetch_nearby(),
            Reaction::RenderTerrain => self.render_terrain(),
        }
    }

    fn fetch_nearby(&mut self) {
        let Some(selected) = self.state.selected else {
            return;
        };

        self.counters.nearby_requests += 1;
        let request = self.counters.nearby_requests;
        let nearby = Arc::clone(&self.nearby);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = nearby.fetch_nearby(selected.location).await;
            let _ = tx.send(Event::NearbyFetched { request, result });
        });
    }

    fn render_terrain(&mut self) {
        if !self.state.terrain_ready() {
            debug!("Terrain inputs incomplete, skipping render");
            return;
        }

        let (Some(hazards), Some(peaks), Some(surface)) = (
            self.state.hazards.as_ref(),
            self.state.peaks.as_ref(),
            self.state.surface.as_mut(),
        ) else {
            return;
        };

        let classification = terrain::classify(hazards, peaks);
        terrain::render(&classification, surface.as_mut());
        self.counters.terrain_renders += 1;
    }
}
