//! gRPC layer.

mod agent_grpc;
mod convert;
mod todo_grpc;

pub use agent_grpc::AgentGrpcService;
pub use todo_grpc::TodoGrpcService;
