// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed client for the analysis and graph-storage endpoints.
//!
//! Each method maps one endpoint onto the coordinator with a fixed operation
//! key. Graph-bearing responses come back as raw JSON for
//! [`crate::normalize`]; list responses are decoded into the wire DTOs.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::model::{GraphId, NodeId, SystemId, TextId};
use crate::ops::NodeDetails;

use super::coordinator::{Coordinator, RequestError, RetryPolicy};
use super::http::{HttpTransport, RequestSpec, Transport};
use super::wire::{
    AnalyzeRequest, AssignGraphToSystemRequest, CreateKnowledgeSystemRequest, DeleteTextRequest,
    GetGraphRequest, GraphSnapshot, GraphSummary, KnowledgeSystem, ListGraphsBySystemRequest,
    SavedText, SaveTextRequest, UpdateGraphRequest, UpdateNodeDetailsRequest,
};

pub struct GraphClient<T> {
    coordinator: Coordinator<T>,
}

impl GraphClient<HttpTransport> {
    pub fn over_http(base_url: impl Into<String>) -> Self {
        Self::new(HttpTransport::new(base_url))
    }
}

impl<T: Transport> GraphClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            coordinator: Coordinator::new(transport),
        }
    }

    /// Analyzes free text into a graph payload. A newer call supersedes any
    /// analysis still in flight.
    pub async fn analyze_text(
        &self,
        text: &str,
        include_details: bool,
    ) -> Result<Value, RequestError> {
        let request = AnalyzeRequest {
            text: text.to_owned(),
            include_details,
        };
        self.coordinator
            .execute(
                "analyze",
                RequestSpec::post("analyzeTextToGraph", payload(&request)),
                RetryPolicy::analysis(),
            )
            .await
    }

    pub async fn get_graph(&self, graph_id: &GraphId) -> Result<Value, RequestError> {
        let request = GetGraphRequest {
            graph_id: graph_id.to_string(),
        };
        self.coordinator
            .execute(
                &format!("load:{graph_id}"),
                RequestSpec::post("getGraph", payload(&request)),
                RetryPolicy::default(),
            )
            .await
    }

    pub async fn update_graph(
        &self,
        graph_id: &GraphId,
        snapshot: &GraphSnapshot,
    ) -> Result<Value, RequestError> {
        let request = UpdateGraphRequest {
            graph_id: graph_id.to_string(),
            nodes: snapshot.nodes.clone(),
            edges: snapshot.edges.clone(),
        };
        self.coordinator
            .execute(
                &format!("update:{graph_id}"),
                RequestSpec::post("updateGraph", payload(&request)),
                RetryPolicy::default(),
            )
            .await
    }

    pub async fn update_node_details(
        &self,
        graph_id: &GraphId,
        node_id: &NodeId,
        details: &NodeDetails,
    ) -> Result<Value, RequestError> {
        let request = UpdateNodeDetailsRequest {
            graph_id: graph_id.to_string(),
            node_id: node_id.to_string(),
            user_notes: details.user_notes.clone(),
            applicability_conditions: details.applicability_conditions.clone(),
            user_significance: details
                .user_significance
                .map(|significance| significance.as_wire_str().to_owned()),
            associated_tag_ids: details
                .associated_tag_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
        };
        self.coordinator
            .execute(
                &format!("details:{graph_id}:{node_id}"),
                RequestSpec::post("updateNodeDetails", payload(&request)),
                RetryPolicy::default(),
            )
            .await
    }

    pub async fn save_text(&self, title: &str, content: &str) -> Result<Value, RequestError> {
        let request = SaveTextRequest {
            title: title.to_owned(),
            content: content.to_owned(),
        };
        self.coordinator
            .execute(
                "save-text",
                RequestSpec::post("saveText", payload(&request)),
                RetryPolicy::default(),
            )
            .await
    }

    pub async fn list_saved_texts(&self) -> Result<Vec<SavedText>, RequestError> {
        let value = self
            .coordinator
            .execute(
                "list:texts",
                RequestSpec::get("listSavedTexts"),
                RetryPolicy::default(),
            )
            .await?;
        decode(value)
    }

    pub async fn delete_text(&self, text_id: &TextId) -> Result<Value, RequestError> {
        let request = DeleteTextRequest {
            text_id: text_id.to_string(),
        };
        self.coordinator
            .execute(
                &format!("delete-text:{text_id}"),
                RequestSpec::delete("deleteText", payload(&request)),
                RetryPolicy::default(),
            )
            .await
    }

    pub async fn list_all_graphs(&self) -> Result<Vec<GraphSummary>, RequestError> {
        let value = self
            .coordinator
            .execute(
                "list:graphs",
                RequestSpec::get("listAllGraphs"),
                RetryPolicy::default(),
            )
            .await?;
        decode(value)
    }

    pub async fn create_knowledge_system(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Value, RequestError> {
        let request = CreateKnowledgeSystemRequest {
            name: name.to_owned(),
            description: description.map(str::to_owned),
        };
        self.coordinator
            .execute(
                "create-system",
                RequestSpec::post("createKnowledgeSystem", payload(&request)),
                RetryPolicy::default(),
            )
            .await
    }

    pub async fn list_knowledge_systems(&self) -> Result<Vec<KnowledgeSystem>, RequestError> {
        let value = self
            .coordinator
            .execute(
                "list:systems",
                RequestSpec::get("listKnowledgeSystems"),
                RetryPolicy::default(),
            )
            .await?;
        decode(value)
    }

    pub async fn assign_graph_to_system(
        &self,
        graph_id: &GraphId,
        system_id: &SystemId,
    ) -> Result<Value, RequestError> {
        let request = AssignGraphToSystemRequest {
            graph_id: graph_id.to_string(),
            system_id: system_id.to_string(),
        };
        self.coordinator
            .execute(
                &format!("assign:{graph_id}"),
                RequestSpec::post("assignGraphToSystem", payload(&request)),
                RetryPolicy::default(),
            )
            .await
    }

    pub async fn list_graphs_by_system(
        &self,
        system_id: &SystemId,
    ) -> Result<Vec<GraphSummary>, RequestError> {
        let request = ListGraphsBySystemRequest {
            system_id: system_id.to_string(),
        };
        let value = self
            .coordinator
            .execute(
                &format!("system-graphs:{system_id}"),
                RequestSpec::post("listGraphsBySystem", payload(&request)),
                RetryPolicy::default(),
            )
            .await?;
        decode(value)
    }

    /// Cancels a pending analysis without starting a new one.
    pub fn cancel_analysis(&self) {
        self.coordinator.cancel("analyze");
    }

    pub fn cancel_all(&self) {
        self.coordinator.cancel_all();
    }
}

fn payload<T: Serialize>(request: &T) -> Value {
    serde_json::to_value(request).expect("request payload serializes to JSON")
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RequestError> {
    serde_json::from_value(value).map_err(|err| RequestError::Parse {
        message: err.to_string(),
    })
}
