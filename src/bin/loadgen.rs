//! Load generator for a running moderator instance.
//!
//! Usage: loadgen [base_url] [api_key]
//!
//! Sends 100 concurrent analyze requests, half of them the same text to
//! exercise the cache path, and prints latency percentiles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use hdrhistogram::Histogram;
use tokio::sync::Mutex;
use tokio::task;

const TOTAL_REQUESTS: usize = 100;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let base_url = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "http://127.0.0.1:8080".to_string());
    let api_key = args.get(2).cloned();

    println!("Hitting {base_url} with {TOTAL_REQUESTS} requests...");

    let client = reqwest::Client::new();
    let histogram = Arc::new(Mutex::new(
        Histogram::<u64>::new(3).expect("histogram sigfigs"),
    ));
    let success = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));
    let start_time = Instant::now();

    let mut tasks = Vec::new();
    for i in 0..TOTAL_REQUESTS {
        let client = client.clone();
        let histogram = histogram.clone();
        let success = success.clone();
        let errors = errors.clone();
        let api_key = api_key.clone();
        let url = format!("{base_url}/api/v1/analyze");

        // Even requests repeat one text to hit the cache; odd ones are unique.
        let text = if i % 2 == 0 {
            "I love this product! It's amazing!".to_string()
        } else {
            format!("Review number {i}: it was fine, nothing special.")
        };

        tasks.push(task::spawn(async move {
            let mut req = client.post(&url).json(&serde_json::json!({ "text": text }));
            if let Some(key) = &api_key {
                req = req.header("X-API-Key", key);
            }

            let sent = Instant::now();
            match req.send().await {
                Ok(resp) if resp.status().is_success() => {
                    let micros = sent.elapsed().as_micros() as u64;
                    histogram.lock().await.record(micros).ok();
                    success.fetch_add(1, Ordering::Relaxed);
                }
                Ok(resp) => {
                    eprintln!("request failed: HTTP {}", resp.status());
                    errors.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    eprintln!("request error: {e}");
                    errors.fetch_add(1, Ordering::Relaxed);
                }
            }
        }));
    }

    for t in tasks {
        let _ = t.await;
    }

    let duration = start_time.elapsed();
    let hist = histogram.lock().await;

    println!("--- Results ---");
    println!("Success: {}", success.load(Ordering::Relaxed));
    println!("Errors: {}", errors.load(Ordering::Relaxed));
    println!("Total Time: {duration:?}");
    println!(
        "RPS: {:.2}",
        TOTAL_REQUESTS as f64 / duration.as_secs_f64()
    );
    if hist.len() > 0 {
        println!("p50: {:.2} ms", hist.value_at_quantile(0.50) as f64 / 1000.0);
        println!("p99: {:.2} ms", hist.value_at_quantile(0.99) as f64 / 1000.0);
    }
}
