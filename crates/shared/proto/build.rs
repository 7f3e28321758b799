fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Session service: identity, tokens, agency approval
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/session.proto"], &["proto/"])?;

    // Back-office data services: agents and todos
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/backoffice.proto"], &["proto/"])?;

    Ok(())
}
