pub mod address;
pub mod amount;
pub mod graph;
pub mod transaction;

pub use address::Address;
pub use amount::EthAmount;
pub use graph::GraphData;
pub use graph::GraphLink;
pub use graph::GraphNode;
pub use graph::NodeKeying;
pub use graph::TransferGraph;
pub use transaction::AcceptedTransaction;
pub use transaction::RawTransaction;
