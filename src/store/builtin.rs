//! Built-in demo dataset: one beef consignment from farm to store.

use super::RecordStore;
use crate::model::{
    FlowGraph, FlowRecord, GraphEdge, GraphNode, MetricValue, NodeId, OrderedMap, RecordId,
};

/// Build the demo store.
///
/// The data is static and known-valid; identifiers are constructed through
/// the same smart constructors as loaded data, and any failure falls back
/// to an empty store rather than panicking.
pub(crate) fn demo_store() -> RecordStore {
    match (demo_records(), demo_graph()) {
        (Some(records), Some(graph)) => {
            RecordStore::new(records, graph).unwrap_or_else(|_| RecordStore::empty())
        }
        _ => RecordStore::empty(),
    }
}

fn demo_records() -> Option<Vec<FlowRecord>> {
    let id = |s: &str| RecordId::new(s).ok();

    Some(vec![
        FlowRecord::new(id("f1")?, "Farm")
            .with_company("Farm A (PIC NS123456)")
            .with_date("2025-08-15")
            .with_refs([("NVD", "NVD-2025-08-15-001"), ("PIC", "NS123456")])
            .with_metrics([("head", 48.0)])
            .with_tags(["eNVD", "NLIS"]),
        FlowRecord::new(id("f2")?, "Transport")
            .with_company("Lindsay Transport Pty Ltd")
            .with_route("Farm A (PIC NS123456)", "JBS Dinmore (PIC QL654321)")
            .with_date("2025-08-15")
            .with_metrics([("tempAvgC", 3.1)])
            .with_tags(["Animal Welfare", "Temp Log"]),
        FlowRecord::new(id("f3")?, "Processor")
            .with_company("JBS Dinmore (Processor)")
            .with_date("2025-08-16")
            .with_refs([
                ("CarcaseID", "C-20250816-001…048"),
                ("MSA_Batch", "MSA-0816-A"),
            ])
            .with_metrics([("HSCW_avg_kg", 298.0), ("MSA_Index_avg", 63.2)])
            .with_tags(["MSA", "AUS-MEAT"]),
        FlowRecord::new(id("f4")?, "Case-Ready")
            .with_company("Hilton Foods Australia")
            .with_date("2025-08-16")
            .with_refs([
                ("ASN", "ASN20250816"),
                ("SSCC", "003934567890123456"),
                ("GTIN", "09345678000012"),
                ("Lot", "BEEF-AUG15-01"),
            ])
            .with_tags(["DESADV", "GS1-128"]),
        FlowRecord::new(id("f5")?, "DC")
            .with_company("Woolworths DC – Minchinbury NSW")
            .with_date("2025-08-17")
            .with_metrics([
                ("pallets", MetricValue::Number(48.0)),
                ("ssccMatch", MetricValue::from("100%")),
                ("tempArrivalC", MetricValue::Number(1.8)),
            ])
            .with_tags(["QA", "Vendor Compliance"]),
        FlowRecord::new(id("f6")?, "Store")
            .with_company("Woolworths Parramatta Store")
            .with_date("2025-08-17")
            .with_metrics([
                ("posScans", MetricValue::Number(1324.0)),
                ("wastePct", MetricValue::from("1.2%")),
            ])
            .with_tags(["POS", "Sales"]),
    ])
}

fn demo_graph() -> Option<FlowGraph> {
    let nid = |s: &str| NodeId::new(s).ok();
    let rid = |s: &str| RecordId::new(s).ok();

    let nodes = vec![
        GraphNode::new(nid("FarmA")?, "Farm A\\nPIC NS123456", "Farm"),
        GraphNode::new(nid("Transport")?, "Lindsay Transport", "Transport"),
        GraphNode::new(nid("Processor")?, "JBS Dinmore", "Processor"),
        GraphNode::new(nid("CaseReady")?, "Hilton Foods", "Case-Ready"),
        GraphNode::new(nid("DC")?, "Woolworths DC\\nMinchinbury", "DC"),
        GraphNode::new(nid("Store")?, "Woolworths\\nParramatta", "Store"),
    ];

    let edges = vec![
        GraphEdge::new("e1", nid("FarmA")?, nid("Transport")?).with_label("eNVD/NLIS"),
        GraphEdge::new("e2", nid("Transport")?, nid("Processor")?).with_label("Movement"),
        GraphEdge::new("e3", nid("Processor")?, nid("CaseReady")?).with_label("MSA/Cartons"),
        GraphEdge::new("e4", nid("CaseReady")?, nid("DC")?).with_label("DESADV/SSCC"),
        GraphEdge::new("e5", nid("DC")?, nid("Store")?).with_label("QA/POS"),
    ];

    let mut links = OrderedMap::new();
    for (node, record) in [
        ("FarmA", "f1"),
        ("Transport", "f2"),
        ("Processor", "f3"),
        ("CaseReady", "f4"),
        ("DC", "f5"),
        ("Store", "f6"),
    ] {
        links.insert(node, rid(record)?);
    }

    Some(FlowGraph {
        nodes,
        edges,
        links,
    })
}
