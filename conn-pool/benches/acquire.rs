use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use conn_pool::{Close, Pool, Poolable};

struct Conn(usize);

impl Close for Conn {
    type Error = ();

    fn close(self) -> Result<(), ()> {
        Ok(())
    }
}

fn conn_pool(max_count: usize) -> Pool<Conn, ()> {
    Pool::new(max_count, || Ok(Poolable::from(Conn(0)))).unwrap()
}

fn acquire_regain(c: &mut Criterion) {
    let pool = conn_pool(4);
    c.bench_function("acquire-regain", |b| {
        b.iter(|| {
            let res = pool.acquire().unwrap();
            black_box(res.0);
            pool.regain(res).unwrap();
        });
    });
}

fn acquire_contended(c: &mut Criterion) {
    let pool = conn_pool(2);
    c.bench_function("acquire-contended-4", |b| {
        b.iter(|| {
            let handles = (0..4)
                .map(|_| {
                    let pool = pool.clone();
                    thread::spawn(move || {
                        for _ in 0..100 {
                            let res = pool.acquire().unwrap();
                            black_box(res.0);
                            pool.regain(res).unwrap();
                        }
                    })
                })
                .collect::<Vec<_>>();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });
}

fn acquire_replace(c: &mut Criterion) {
    let pool = conn_pool(4);
    c.bench_function("acquire-close", |b| {
        b.iter(|| {
            let res = pool.acquire().unwrap();
            pool.close(res).unwrap();
        });
    });
}

criterion_group!(benches, acquire_regain, acquire_contended, acquire_replace);
criterion_main!(benches);
