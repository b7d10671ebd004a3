//! Performance benchmarks for fpga-bridge
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fpga_bridge::command::{BitVector, Command};
use fpga_bridge::config::{Config, TomlConfig};
use fpga_bridge::platform::{parse_ip_addr_output, parse_ipconfig_output};
use serde_json::json;

fn bench_bit_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_vector");

    for raw in ["10110111", "1011011", "1011011x"] {
        group.bench_with_input(BenchmarkId::new("parse", raw), raw, |b, raw| {
            b.iter(|| {
                let _ = BitVector::parse(black_box(raw));
            });
        });
    }

    group.finish();
}

fn bench_command_validation(c: &mut Criterion) {
    let bits = json!("10110111");
    let opcode = json!("ADD");
    let a = json!("1.5");
    let b = json!(2);

    c.bench_function("validate_bits", |bench| {
        bench.iter(|| Command::validate_bits(black_box(Some(&bits))));
    });

    c.bench_function("validate_opcode_and_encode", |bench| {
        bench.iter(|| {
            Command::validate_opcode(
                black_box(Some(&opcode)),
                black_box(Some(&a)),
                black_box(Some(&b)),
            )
            .map(|cmd| cmd.to_args())
        });
    });
}

fn bench_tool_output_parsing(c: &mut Criterion) {
    let ipconfig = "\
Ethernet adapter vEthernet (WSL):\r
   IPv4 Address. . . . . . . . . . . : 172.27.144.1\r
Unknown adapter VPN:\r
   IPv4 Address. . . . . . . . . . . : 10.8.0.14\r
Wireless LAN adapter Wi-Fi:\r
   IPv4 Address. . . . . . . . . . . : 192.168.1.42\r
";
    let ip_addr = "    inet 172.27.144.85/20 brd 172.27.159.255 scope global eth0\n";
    let prefixes = vec!["172.".to_string(), "127.".to_string(), "10.".to_string()];

    c.bench_function("parse_ipconfig", |b| {
        b.iter(|| parse_ipconfig_output(black_box(ipconfig), black_box(&prefixes)));
    });

    c.bench_function("parse_ip_addr", |b| {
        b.iter(|| parse_ip_addr_output(black_box(ip_addr)));
    });
}

fn bench_config_parsing(c: &mut Criterion) {
    let toml_data = r#"
variant = "cpu"
port = 8080

[cpu]
program = "/opt/cpu/main"

[network]
exclude_prefixes = ["172.", "127.", "10."]
"#;

    c.bench_function("config_parsing_toml", |b| {
        b.iter(|| {
            let config: Config = TomlConfig::parse(black_box(toml_data)).unwrap().into();
            config
        });
    });
}

criterion_group!(
    benches,
    bench_bit_parsing,
    bench_command_validation,
    bench_tool_output_parsing,
    bench_config_parsing
);
criterion_main!(benches);
