use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use topology_layout::{LayoutConfig, ResourceLink, ResourceNode, Topology, compute_layout};

fn chain_topology(len: usize) -> Topology {
    let mut topology = Topology::default();
    for i in 0..len {
        topology
            .nodes
            .push(ResourceNode::new(&format!("n{i}"), "deployment"));
    }
    for i in 0..len.saturating_sub(1) {
        topology
            .links
            .push(ResourceLink::new(&format!("n{i}"), &format!("n{}", i + 1)));
    }
    topology
}

fn fan_topology(width: usize) -> Topology {
    let mut topology = Topology::default();
    topology
        .nodes
        .push(ResourceNode::new("root", "application"));
    for i in 0..width {
        let id = format!("leaf{i}");
        topology.nodes.push(ResourceNode::new(&id, "pod"));
        topology.links.push(ResourceLink::new("root", &id));
    }
    topology
}

// Balanced tree: every node at depth < levels fans out `arity` children.
fn tree_topology(arity: usize, levels: usize) -> Topology {
    let mut topology = Topology::default();
    topology.nodes.push(ResourceNode::new("n0", "application"));
    let mut frontier = vec!["n0".to_string()];
    let mut counter = 1usize;
    for _ in 0..levels {
        let mut next = Vec::new();
        for parent in &frontier {
            for _ in 0..arity {
                let id = format!("n{counter}");
                counter += 1;
                topology.nodes.push(ResourceNode::new(&id, "deployment"));
                topology.links.push(ResourceLink::new(parent, &id));
                next.push(id);
            }
        }
        frontier = next;
    }
    topology
}

fn bench_layout(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let mut group = c.benchmark_group("layout");

    for len in [8usize, 64, 512] {
        let topology = chain_topology(len);
        group.bench_with_input(BenchmarkId::new("chain", len), &topology, |b, topology| {
            b.iter(|| compute_layout(black_box(topology), black_box(&config)));
        });
    }

    for width in [16usize, 128, 1024] {
        let topology = fan_topology(width);
        group.bench_with_input(BenchmarkId::new("fan", width), &topology, |b, topology| {
            b.iter(|| compute_layout(black_box(topology), black_box(&config)));
        });
    }

    for levels in [3usize, 5, 7] {
        let topology = tree_topology(3, levels);
        group.bench_with_input(
            BenchmarkId::new("tree", levels),
            &topology,
            |b, topology| {
                b.iter(|| compute_layout(black_box(topology), black_box(&config)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
