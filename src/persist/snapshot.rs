use crate::error::{FlowError, Result};
use crate::network::Capacity;
use crate::network::network::Network;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One outgoing arc in a [`NetworkSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcRecord<K> {
    pub to: K,
    pub capacity: Capacity,
}

/// One node and its full adjacency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord<K> {
    pub key: K,
    #[serde(default = "Vec::new")]
    pub arcs: Vec<ArcRecord<K>>,
}

/// Serialisable form of a [`Network`]. Indegrees are not stored; they are rebuilt on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot<K> {
    pub nodes: Vec<NodeRecord<K>>,
}

impl<K: Ord + Clone + fmt::Debug> Network<K> {
    pub fn snapshot(&self) -> NetworkSnapshot<K> {
        let nodes = self
            .nodes()
            .filter_map(|key| self.node(key))
            .map(|node| NodeRecord {
                key: node.key().clone(),
                arcs: node
                    .arcs()
                    .map(|(to, capacity)| ArcRecord {
                        to: to.clone(),
                        capacity,
                    })
                    .collect(),
            })
            .collect();
        NetworkSnapshot { nodes }
    }

    /// Rebuilds a network. Every arc target must be declared as a node of its own, and no
    /// node may be declared twice.
    pub fn from_snapshot(snapshot: NetworkSnapshot<K>) -> Result<Self> {
        let mut declared = BTreeSet::new();
        for record in &snapshot.nodes {
            if !declared.insert(&record.key) {
                return Err(FlowError::DuplicateNode(format!("{:?}", record.key)));
            }
        }
        if let Some(arc) = snapshot
            .nodes
            .iter()
            .flat_map(|n| &n.arcs)
            .find(|arc| !declared.contains(&arc.to))
        {
            return Err(FlowError::UnknownNode(format!("{:?}", arc.to)));
        }

        let mut network = Network::new();
        for record in &snapshot.nodes {
            network.add_node(record.key.clone());
        }
        for record in snapshot.nodes {
            for arc in record.arcs {
                network.insert_arc(record.key.clone(), arc.to, arc.capacity)?;
            }
        }
        Ok(network)
    }
}

pub fn save_json<K, P>(network: &Network<K>, path: P) -> Result<()>
where
    K: Ord + Clone + fmt::Debug + Serialize,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &network.snapshot())?;
    writer.flush()?;
    Ok(())
}

pub fn load_json<K, P>(path: P) -> Result<Network<K>>
where
    K: Ord + Clone + fmt::Debug + DeserializeOwned,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    let snapshot: NetworkSnapshot<K> = serde_json::from_reader(reader)?;
    Network::from_snapshot(snapshot)
}
