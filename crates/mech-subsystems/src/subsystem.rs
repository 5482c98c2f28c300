//! 子系统接口

use mech_telemetry::TelemetrySink;

/// 由控制循环每周期调用一次的子系统控制器
pub trait Subsystem {
    /// 子系统名（遥测 key 的第一级）
    fn name(&self) -> &'static str;

    /// 一个控制周期：刷新快照并发布遥测
    ///
    /// 不得阻塞。
    fn periodic(&mut self, sink: &mut dyn TelemetrySink);

    /// 停止所有输出
    fn stop(&mut self);
}

impl<T: Subsystem + ?Sized> Subsystem for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn periodic(&mut self, sink: &mut dyn TelemetrySink) {
        (**self).periodic(sink)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// 一组按注册顺序排列的子系统
pub trait SubsystemSet {
    /// 按注册顺序访问每个子系统
    fn for_each_subsystem(&mut self, visit: &mut dyn FnMut(&mut dyn Subsystem));

    /// 停止所有子系统
    fn stop_all(&mut self) {
        self.for_each_subsystem(&mut |subsystem| {
            tracing::debug!(subsystem = subsystem.name(), "stopping");
            subsystem.stop();
        });
    }
}

impl<S: Subsystem> SubsystemSet for [S] {
    fn for_each_subsystem(&mut self, visit: &mut dyn FnMut(&mut dyn Subsystem)) {
        for subsystem in self {
            visit(subsystem);
        }
    }
}

impl<S: Subsystem> SubsystemSet for Vec<S> {
    fn for_each_subsystem(&mut self, visit: &mut dyn FnMut(&mut dyn Subsystem)) {
        self.as_mut_slice().for_each_subsystem(visit)
    }
}
