use std::sync::{mpsc, Arc, Mutex};
use std::thread;

/// Simple threadpool, joining all threads on drop.
///
/// Heavily inspired by the one in the Rust book:
/// https://doc.rust-lang.org/book/ch20-02-multithreaded.html
pub struct ThreadPool {
    workers: Vec<Worker>,
    sender: Option<mpsc::Sender<Job>>,
}

impl ThreadPool {
    /// Create a new ThreadPool with `size` threads.
    ///
    /// `size` must be greater than 0.
    pub fn new(size: usize) -> ThreadPool {
        assert!(size > 0, "ThreadPool size must be greater than 0");

        let (sender, receiver) = mpsc::channel();
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..size)
            .map(|_| Worker::new(Arc::clone(&receiver)))
            .collect();

        ThreadPool {
            workers,
            sender: Some(sender),
        }
    }

    /// Create a pool with one thread per core, which is what the HTTP
    /// server wants. Falls back to 4 threads when the parallelism cannot
    /// be queried.
    pub fn sized_for_machine() -> ThreadPool {
        ThreadPool::new(
            thread::available_parallelism()
                .map(usize::from)
                .unwrap_or(4),
        )
    }

    /// Queue a task to run on the threadpool when a worker is available.
    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let job = Box::new(f);
        self.sender.as_ref().unwrap().send(job).unwrap();
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Closing the channel is what makes the workers stop
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            worker.handle.join().unwrap();
        }
    }
}

/// Type of jobs to be executed by the threadpool.
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Worker struct, holding a thread handle.
struct Worker {
    handle: thread::JoinHandle<()>,
}

impl Worker {
    /// Create a new worker that will execute jobs from the given receiver
    /// until this one is closed.
    fn new(receiver: Arc<Mutex<mpsc::Receiver<Job>>>) -> Worker {
        let handle = thread::spawn(move || loop {
            // The lock is held only while receiving, never while the job runs
            let job = match receiver.lock().unwrap().recv() {
                Ok(job) => job,
                Err(_) => break,
            };
            job();
        });

        Worker { handle }
    }
}
