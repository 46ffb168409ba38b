// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stateful graph session: load, mutate, export.
//!
//! The session is the single owner of the current graph. Loads run through
//! the request coordinator and only the newest load may install its result.
//! Mutations apply locally first; persistence runs afterwards and a failure
//! never rolls the local change back, it only leaves a notice.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::model::{EdgeId, GraphId, GraphModel, NodeCategory, NodeId, RelationshipType};
use crate::normalize::{normalize, Diagnostic};
use crate::ops::{
    apply_ops, ApplyError, ApplyResult, EdgePatch, EntityRef, GraphOp, NodeDetails, NodePatch,
};
use crate::remote::wire::GraphSnapshot;
use crate::remote::{GraphClient, RequestError, Transport};
use crate::surface::SurfaceEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    Loading,
    Ready,
}

/// What the user has picked on the canvas, if anything.
///
/// Clicks select exactly what the engine reported; the id is not checked
/// against the model. Loads, `clear`, `replace_all`, and mutations that
/// remove the selected entity reset this to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Node(NodeId),
    Edge(EdgeId),
}

impl Selection {
    fn refers_to(&self, entity: &EntityRef) -> bool {
        match (self, entity) {
            (Selection::Node(id), EntityRef::Node(other)) => id == other,
            (Selection::Edge(id), EntityRef::Edge(other)) => id == other,
            _ => false,
        }
    }
}

/// What a finished load produced, independent of the installed state.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub graph_id: Option<GraphId>,
    pub name: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Non-blocking problem report. Notices accumulate until drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotice {
    PersistenceFailed {
        operation: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    EmptyText,
    NotReady,
    Apply(ApplyError),
    Load(RequestError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyText => write!(f, "text is empty"),
            SessionError::NotReady => write!(f, "no graph is loaded"),
            SessionError::Apply(err) => write!(f, "{err}"),
            SessionError::Load(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Apply(err) => Some(err),
            SessionError::Load(err) => Some(err),
            _ => None,
        }
    }
}

struct CurrentGraph {
    graph_id: Option<GraphId>,
    name: Option<String>,
    model: GraphModel,
    diagnostics: Vec<Diagnostic>,
}

/// Which flavor of load produced a result, for status wording.
#[derive(Clone, Copy)]
enum LoadKind {
    Analysis,
    Storage,
}

struct SessionInner {
    loading: bool,
    /// Bumped by every load start and by `clear`. A finishing load installs
    /// its result only while its captured epoch is still current.
    epoch: u64,
    current: Option<CurrentGraph>,
    selection: Selection,
    /// One line about the last completed load, for the host's status bar.
    status: Option<String>,
    notices: Vec<SessionNotice>,
}

impl SessionInner {
    fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.current.is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Empty
        }
    }

    fn ready_mut(&mut self) -> Result<&mut CurrentGraph, SessionError> {
        if self.loading {
            return Err(SessionError::NotReady);
        }
        self.current.as_mut().ok_or(SessionError::NotReady)
    }

    fn ready(&self) -> Result<&CurrentGraph, SessionError> {
        if self.loading {
            return Err(SessionError::NotReady);
        }
        self.current.as_ref().ok_or(SessionError::NotReady)
    }
}

pub struct GraphSession<T> {
    client: GraphClient<T>,
    state: Mutex<SessionInner>,
    node_seq: AtomicU64,
}

impl<T: Transport> GraphSession<T> {
    pub fn new(client: GraphClient<T>) -> Self {
        Self {
            client,
            state: Mutex::new(SessionInner {
                loading: false,
                epoch: 0,
                current: None,
                selection: Selection::None,
                status: None,
                notices: Vec::new(),
            }),
            node_seq: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &GraphClient<T> {
        &self.client
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.lock().await.phase()
    }

    pub async fn graph_id(&self) -> Option<GraphId> {
        let inner = self.state.lock().await;
        inner.current.as_ref().and_then(|c| c.graph_id.clone())
    }

    pub async fn graph_name(&self) -> Option<String> {
        let inner = self.state.lock().await;
        inner.current.as_ref().and_then(|c| c.name.clone())
    }

    pub async fn rev(&self) -> Option<u64> {
        let inner = self.state.lock().await;
        inner.current.as_ref().map(|c| c.model.rev())
    }

    /// Clone of the current model, if any.
    pub async fn model(&self) -> Option<GraphModel> {
        let inner = self.state.lock().await;
        inner.current.as_ref().map(|c| c.model.clone())
    }

    /// Diagnostics from the load that produced the current graph.
    pub async fn diagnostics(&self) -> Vec<Diagnostic> {
        let inner = self.state.lock().await;
        inner
            .current
            .as_ref()
            .map(|c| c.diagnostics.clone())
            .unwrap_or_default()
    }

    pub async fn selection(&self) -> Selection {
        self.state.lock().await.selection.clone()
    }

    /// Human-readable line about the last completed load, if one finished.
    pub async fn status_line(&self) -> Option<String> {
        self.state.lock().await.status.clone()
    }

    pub async fn drain_notices(&self) -> Vec<SessionNotice> {
        let mut inner = self.state.lock().await;
        std::mem::take(&mut inner.notices)
    }

    /// Sends `text` for analysis and installs the resulting graph.
    ///
    /// Blank input fails fast without a request. A newer load started while
    /// this one is in flight wins; the older one finishes as superseded with
    /// the session untouched.
    pub async fn analyze_text(&self, text: &str) -> Result<LoadReport, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyText);
        }
        let epoch = self.begin_load().await;
        let outcome = self.client.analyze_text(text, true).await;
        self.finish_load(epoch, outcome, None, LoadKind::Analysis).await
    }

    /// Loads a stored graph by id.
    pub async fn load_graph(&self, graph_id: &GraphId) -> Result<LoadReport, SessionError> {
        let epoch = self.begin_load().await;
        let outcome = self.client.get_graph(graph_id).await;
        self.finish_load(epoch, outcome, Some(graph_id.clone()), LoadKind::Storage)
            .await
    }

    /// Drops the current graph and returns the session to `Empty`. Any load
    /// still in flight is discarded when it lands.
    pub async fn clear(&self) {
        let mut inner = self.state.lock().await;
        inner.epoch = inner.epoch.wrapping_add(1);
        inner.loading = false;
        inner.current = None;
        inner.selection = Selection::None;
        inner.status = None;
    }

    pub async fn add_node(
        &self,
        label: &str,
        category: Option<NodeCategory>,
    ) -> Result<NodeId, SessionError> {
        let node_id = self.fresh_node_id();
        self.mutate(vec![GraphOp::AddNode {
            node_id: node_id.clone(),
            label: label.to_owned(),
            category,
        }])
        .await?;
        Ok(node_id)
    }

    pub async fn update_node(
        &self,
        node_id: &NodeId,
        patch: NodePatch,
    ) -> Result<(), SessionError> {
        self.mutate(vec![GraphOp::UpdateNode {
            node_id: node_id.clone(),
            patch,
        }])
        .await?;
        Ok(())
    }

    /// Replaces a node's user detail block and persists it through the
    /// dedicated detail endpoint rather than a full graph write.
    pub async fn set_node_details(
        &self,
        node_id: &NodeId,
        details: NodeDetails,
    ) -> Result<(), SessionError> {
        let graph_id = {
            let mut inner = self.state.lock().await;
            let current = inner.ready_mut()?;
            apply_ops(
                &mut current.model,
                &[GraphOp::SetNodeDetails {
                    node_id: node_id.clone(),
                    details: details.clone(),
                }],
            )
            .map_err(SessionError::Apply)?;
            current.graph_id.clone()
        };

        if let Some(graph_id) = graph_id {
            match self
                .client
                .update_node_details(&graph_id, node_id, &details)
                .await
            {
                Ok(_) | Err(RequestError::Superseded) => {}
                Err(err) => self.record_persistence_failure("node-details", err).await,
            }
        }
        Ok(())
    }

    pub async fn remove_node(&self, node_id: &NodeId) -> Result<(), SessionError> {
        self.mutate(vec![GraphOp::RemoveNode {
            node_id: node_id.clone(),
        }])
        .await?;
        Ok(())
    }

    /// Adds an edge between two existing nodes. The id derives from the
    /// endpoints, with a `#<n>` suffix once the plain form is taken.
    pub async fn add_edge(
        &self,
        source: &NodeId,
        target: &NodeId,
        relationship: Option<RelationshipType>,
        label: Option<String>,
    ) -> Result<EdgeId, SessionError> {
        let (graph_id, snapshot, edge_id) = {
            let mut inner = self.state.lock().await;
            let current = inner.ready_mut()?;
            let edge_id = current.model.derived_edge_id(source, target);
            apply_ops(
                &mut current.model,
                &[GraphOp::AddEdge {
                    edge_id: edge_id.clone(),
                    source: source.clone(),
                    target: target.clone(),
                    relationship,
                    label,
                }],
            )
            .map_err(SessionError::Apply)?;
            (
                current.graph_id.clone(),
                GraphSnapshot::from_model(&current.model),
                edge_id,
            )
        };
        self.persist_graph(graph_id, snapshot).await;
        Ok(edge_id)
    }

    pub async fn update_edge(
        &self,
        edge_id: &EdgeId,
        patch: EdgePatch,
    ) -> Result<(), SessionError> {
        self.mutate(vec![GraphOp::UpdateEdge {
            edge_id: edge_id.clone(),
            patch,
        }])
        .await?;
        Ok(())
    }

    pub async fn remove_edge(&self, edge_id: &EdgeId) -> Result<(), SessionError> {
        self.mutate(vec![GraphOp::RemoveEdge {
            edge_id: edge_id.clone(),
        }])
        .await?;
        Ok(())
    }

    /// Replaces the whole model, as canvas-side editing does, and persists
    /// the replacement. The revision continues from the replaced model.
    pub async fn replace_all(&self, mut model: GraphModel) -> Result<(), SessionError> {
        let (graph_id, snapshot) = {
            let mut inner = self.state.lock().await;
            let current = inner.ready_mut()?;
            model.set_rev(current.model.rev().saturating_add(1));
            current.model = model;
            let graph_id = current.graph_id.clone();
            let snapshot = GraphSnapshot::from_model(&current.model);
            inner.selection = Selection::None;
            (graph_id, snapshot)
        };
        self.persist_graph(graph_id, snapshot).await;
        Ok(())
    }

    /// Persistable view of the current graph: semantic fields only.
    pub async fn export_snapshot(&self) -> Result<GraphSnapshot, SessionError> {
        let inner = self.state.lock().await;
        let current = inner.ready()?;
        Ok(GraphSnapshot::from_model(&current.model))
    }

    /// Applies one engine-reported interaction to the session.
    ///
    /// Clicks only move the selection. `GraphChanged` is canvas-side editing:
    /// the payload is normalized like any other untrusted graph and then
    /// replaces the current model wholesale.
    pub async fn handle_surface_event(&self, event: SurfaceEvent) -> Result<(), SessionError> {
        match event {
            SurfaceEvent::NodeClicked { node_id } => {
                self.state.lock().await.selection = Selection::Node(node_id);
                Ok(())
            }
            SurfaceEvent::EdgeClicked { edge_id } => {
                self.state.lock().await.selection = Selection::Edge(edge_id);
                Ok(())
            }
            SurfaceEvent::CanvasClicked => {
                self.state.lock().await.selection = Selection::None;
                Ok(())
            }
            SurfaceEvent::GraphChanged { payload } => {
                let (model, diagnostics) = normalize(&payload);
                for diagnostic in &diagnostics {
                    debug!(%diagnostic, "repaired canvas export");
                }
                self.replace_all(model).await
            }
        }
    }

    /// Cancels every in-flight request and returns the session to `Empty`.
    pub async fn close(&self) {
        self.client.cancel_all();
        self.clear().await;
    }

    async fn begin_load(&self) -> u64 {
        let mut inner = self.state.lock().await;
        inner.loading = true;
        inner.epoch = inner.epoch.wrapping_add(1);
        inner.epoch
    }

    async fn finish_load(
        &self,
        epoch: u64,
        outcome: Result<Value, RequestError>,
        fallback_id: Option<GraphId>,
        kind: LoadKind,
    ) -> Result<LoadReport, SessionError> {
        let mut inner = self.state.lock().await;
        if inner.epoch != epoch {
            // A newer load or a clear took over; this result is stale and the
            // loading flag now belongs to the newer owner.
            return Err(SessionError::Load(RequestError::Superseded));
        }

        match outcome {
            Ok(value) => {
                let (model, diagnostics) = normalize(&value);
                let graph_id = value
                    .get("graphId")
                    .and_then(Value::as_str)
                    .and_then(|raw| GraphId::new(raw).ok())
                    .or(fallback_id);
                let name = value
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                let report = LoadReport {
                    graph_id: graph_id.clone(),
                    name: name.clone(),
                    diagnostics: diagnostics.clone(),
                };
                let status = match kind {
                    LoadKind::Analysis => format!(
                        "Analysis complete: {} concepts, {} relationships",
                        model.nodes().len(),
                        model.edges().len()
                    ),
                    LoadKind::Storage => format!(
                        "Loaded graph: {} concepts, {} relationships",
                        model.nodes().len(),
                        model.edges().len()
                    ),
                };
                inner.current = Some(CurrentGraph {
                    graph_id,
                    name,
                    model,
                    diagnostics,
                });
                inner.selection = Selection::None;
                inner.status = Some(status);
                inner.loading = false;
                Ok(report)
            }
            Err(err) => {
                inner.loading = false;
                Err(SessionError::Load(err))
            }
        }
    }

    async fn mutate(&self, ops: Vec<GraphOp>) -> Result<ApplyResult, SessionError> {
        let (graph_id, snapshot, result) = {
            let mut inner = self.state.lock().await;
            let current = inner.ready_mut()?;
            let result = apply_ops(&mut current.model, &ops).map_err(SessionError::Apply)?;
            debug!(rev = result.new_rev, ops = result.applied, "applied mutation batch");
            let graph_id = current.graph_id.clone();
            let snapshot = GraphSnapshot::from_model(&current.model);
            // delta.removed includes cascaded edge deletions.
            if result
                .delta
                .removed
                .iter()
                .any(|entity| inner.selection.refers_to(entity))
            {
                inner.selection = Selection::None;
            }
            (graph_id, snapshot, result)
        };
        self.persist_graph(graph_id, snapshot).await;
        Ok(result)
    }

    /// Pushes the latest snapshot to the service. Without a graph id there is
    /// nothing to address, so the write is skipped. A superseded write means a
    /// newer snapshot is already on its way.
    async fn persist_graph(&self, graph_id: Option<GraphId>, snapshot: GraphSnapshot) {
        let Some(graph_id) = graph_id else {
            return;
        };
        match self.client.update_graph(&graph_id, &snapshot).await {
            Ok(_) | Err(RequestError::Superseded) => {}
            Err(err) => self.record_persistence_failure("update-graph", err).await,
        }
    }

    async fn record_persistence_failure(&self, operation: &'static str, err: RequestError) {
        warn!(operation, error = %err, "persistence failed, keeping local state");
        let mut inner = self.state.lock().await;
        inner.notices.push(SessionNotice::PersistenceFailed {
            operation,
            message: err.to_string(),
        });
    }

    fn fresh_node_id(&self) -> NodeId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let seq = self.node_seq.fetch_add(1, Ordering::Relaxed);
        NodeId::new(format!("node-{millis}-{seq}"))
            .expect("generated node id is a valid id segment")
    }
}
