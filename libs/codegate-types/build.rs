fn main() {
    let check_token = tonic_build::manual::Method::builder()
        .name("check_token")
        .route_name("CheckToken")
        .input_type("crate::rpc::TokenRequest")
        .output_type("crate::rpc::TokenResponse")
        .codec_path("tonic::codec::ProstCodec")
        .build();

    let service = tonic_build::manual::Service::builder()
        .name("AuthService")
        .package("auth")
        .method(check_token)
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);

    println!("cargo:rerun-if-changed=build.rs");
}
