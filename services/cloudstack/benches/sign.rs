use criterion::criterion_main;
use criterion::{criterion_group, Criterion};

use cloudstack_sign::{Command, Credential, RequestSigner};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("cloudstack");

    let signer = RequestSigner::new(Credential::new("api_key", "secret_key"), "127.0.0.1")
        .with_port(8080);
    let list_zones = Command::new("listZones").with_param("available", true);
    let deploy = Command::new("deployVirtualMachine")
        .with_param("serviceOfferingId", "1dcbc44c-7a5e-4b27-9a63-0cf2e7b3d8a0")
        .with_param("templateId", "0c6a4b0a-3f0b-4f1b-9a3c-9b3a0c3f6f21")
        .with_param("zoneId", "a1b2c3d4-0000-1111-2222-333344445555")
        .with_param("displayName", "bench vm / 01")
        .with_param("startVm", true)
        .with_param("size", 20);

    group.bench_function("sign_list_zones", |b| {
        b.iter(|| signer.sign_command(&list_zones).expect("must success"))
    });

    group.bench_function("sign_deploy_vm", |b| {
        b.iter(|| signer.sign_command(&deploy).expect("must success"))
    });

    group.bench_function("into_request", |b| {
        b.iter(|| {
            signer
                .sign_command(&deploy)
                .expect("must success")
                .into_request()
                .expect("must success")
        })
    });

    group.finish();
}
