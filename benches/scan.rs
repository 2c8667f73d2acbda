use criterion::{Criterion, criterion_group, criterion_main};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

fn create_test_project(file_count: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    std::fs::create_dir_all(root.join("src/interfaces")).unwrap();
    std::fs::create_dir_all(root.join("src/libraries")).unwrap();

    for i in 0..file_count {
        let (path, content) = match i % 3 {
            0 => (
                root.join("src/interfaces").join(format!("IPool{}.sol", i)),
                format!(
                    "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.20;\n\ninterface IPool{} {{\n    function deposit(uint256 amount) external;\n}}\n",
                    i
                ),
            ),
            1 => (
                root.join("src").join(format!("Pool{}.sol", i)),
                format!(
                    "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.20;\n\nimport {{IPool{}}} from \"./interfaces/IPool{}.sol\";\n\ncontract Pool{} {{\n    uint256 public total;\n\n    function deposit(uint256 amount) external {{\n        total += amount;\n    }}\n}}\n",
                    i - 1,
                    i - 1,
                    i
                ),
            ),
            _ => (
                root.join("src/libraries").join(format!("Math{}.sol", i)),
                format!(
                    "pragma solidity ^0.8.20;\n\nlibrary Math{} {{\n    function max(uint256 a, uint256 b) internal pure returns (uint256) {{\n        return a > b ? a : b;\n    }}\n}}\n",
                    i
                ),
            ),
        };

        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    temp_dir
}

fn scan_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_contracts");
    group.sample_size(20);

    for count in [10, 100, 500] {
        let project = create_test_project(count);
        let root = project.path().to_path_buf();
        group.bench_function(format!("{}_files", count), |b| {
            b.iter(|| abi_export::core::scan_contracts(&root, &root.join("src"), "sol").unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, scan_benchmark);
criterion_main!(benches);
