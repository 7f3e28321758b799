//! gRPC layer.

mod session_grpc;

pub use session_grpc::SessionGrpcService;
