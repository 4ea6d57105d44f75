mod observer;

pub use observer::ISolverObserver;
