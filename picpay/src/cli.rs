//! # CLI
//!
//! Command-line interface of `picpay`, defined with `clap`. Each subcommand
//! selects one variant; with no flags every variant listens on the fixed
//! default addresses.
use clap::{Parser, Subcommand};
use picpay_core::{
    Variant,
    server::{DEFAULT_ADDR, DEFAULT_GATEWAY_ADDR},
};

#[derive(Parser, Debug)]
#[command(name = "picpay", version, about = "Serve the \"hi picpay\" message")]
pub struct Cli {
    /// Address to listen on (the gRPC address for proto-grpc-rest)
    #[arg(long, global = true, default_value = DEFAULT_ADDR)]
    pub addr: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Plain HTTP handler writing the literal JSON text for every request
    Http,
    /// `GET /` rendering `{"message":"hi picpay"}` through a web router
    Gin,
    /// `GET /` rendering the Protobuf `MessageResponse` as JSON
    ProtoGin,
    /// gRPC `picpay.MessageService/GetMessage`
    ProtoGrpc,
    /// gRPC service plus an HTTP/JSON gateway translating to it
    ProtoGrpcRest {
        /// Address the REST gateway listens on
        #[arg(long, default_value = DEFAULT_GATEWAY_ADDR)]
        gateway_addr: String,
    },
}

impl From<Commands> for Variant {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Http => Variant::Http,
            Commands::Gin => Variant::Json,
            Commands::ProtoGin => Variant::ProtoJson,
            Commands::ProtoGrpc => Variant::Grpc,
            Commands::ProtoGrpcRest { gateway_addr } => Variant::GrpcGateway { gateway_addr },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_fixed_addresses() {
        let cli = Cli::try_parse_from(["picpay", "proto-grpc-rest"]).unwrap();

        assert_eq!(cli.addr, "localhost:8000");
        assert_eq!(
            Variant::from(cli.command),
            Variant::GrpcGateway {
                gateway_addr: "localhost:8001".to_string()
            }
        );
    }

    #[test]
    fn subcommands_map_to_variants() {
        let cases = [
            ("http", Variant::Http),
            ("gin", Variant::Json),
            ("proto-gin", Variant::ProtoJson),
            ("proto-grpc", Variant::Grpc),
        ];

        for (arg, expected) in cases {
            let cli = Cli::try_parse_from(["picpay", arg]).unwrap();
            assert_eq!(Variant::from(cli.command), expected);
        }
    }

    #[test]
    fn addr_can_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["picpay", "gin", "--addr", "127.0.0.1:9000"]).unwrap();

        assert_eq!(cli.addr, "127.0.0.1:9000");
        assert_eq!(cli.command, Commands::Gin);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(Cli::try_parse_from(["picpay", "websocket"]).is_err());
    }
}
